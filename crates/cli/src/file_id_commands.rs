use {
    anyhow::{Context, Result},
    clap::Subcommand,
    mtsend_file_id::FileId,
    serde_json::Value,
};

#[derive(Subcommand)]
pub enum FileIdAction {
    /// Decode an identifier and print its fields as JSON.
    Decode {
        /// Identifier text.
        id: String,
    },
    /// Build a short-form identifier from its fields.
    Encode {
        #[arg(long, allow_hyphen_values = true)]
        media_type: i32,
        #[arg(long, allow_hyphen_values = true)]
        dc_id: i32,
        #[arg(long, allow_hyphen_values = true)]
        media_id: i64,
        #[arg(long, allow_hyphen_values = true)]
        access_hash: i64,
    },
}

pub fn handle_file_id(action: FileIdAction) -> Result<()> {
    match action {
        FileIdAction::Decode { id } => {
            let fields = describe(&id)?;
            println!("{}", serde_json::to_string_pretty(&fields)?);
        },
        FileIdAction::Encode {
            media_type,
            dc_id,
            media_id,
            access_hash,
        } => println!("{}", FileId::new(media_type, dc_id, media_id, access_hash).encode()),
    }
    Ok(())
}

/// Decoded fields plus the media-type name, `null` for unknown codes.
fn describe(raw: &str) -> Result<Value> {
    let id = FileId::parse(raw).context("invalid file identifier")?;
    let mut fields = serde_json::to_value(id)?;
    if let Value::Object(map) = &mut fields {
        map.insert(
            "media_type_name".into(),
            id.kind().map_or(Value::Null, |kind| kind.name().into()),
        );
    }
    Ok(fields)
}
