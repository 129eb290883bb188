/// Kind of media a file identifier points at, keyed by its wire code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaType {
    Thumbnail,
    ProfilePhoto,
    Video,
    Voice,
    Photo,
    Document,
    Sticker,
    Audio,
    /// Animations; the only kind accepted when sending a GIF by identifier.
    Gif,
    VideoNote,
}

const TABLE: &[(i32, MediaType)] = &[
    (0, MediaType::Thumbnail),
    (1, MediaType::ProfilePhoto),
    (2, MediaType::Video),
    (3, MediaType::Voice),
    (4, MediaType::Photo),
    (5, MediaType::Document),
    (8, MediaType::Sticker),
    (9, MediaType::Audio),
    (10, MediaType::Gif),
    (13, MediaType::VideoNote),
];

impl MediaType {
    #[must_use]
    pub fn from_code(code: i32) -> Option<Self> {
        TABLE
            .iter()
            .find_map(|&(c, kind)| (c == code).then_some(kind))
    }

    #[must_use]
    pub fn code(self) -> i32 {
        match self {
            Self::Thumbnail => 0,
            Self::ProfilePhoto => 1,
            Self::Video => 2,
            Self::Voice => 3,
            Self::Photo => 4,
            Self::Document => 5,
            Self::Sticker => 8,
            Self::Audio => 9,
            Self::Gif => 10,
            Self::VideoNote => 13,
        }
    }

    /// Human-readable name used in error messages.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Thumbnail => "thumbnail",
            Self::ProfilePhoto => "profile_photo",
            Self::Video => "video",
            Self::Voice => "voice",
            Self::Photo => "photo",
            Self::Document => "document",
            Self::Sticker => "sticker",
            Self::Audio => "audio",
            Self::Gif => "gif",
            Self::VideoNote => "video_note",
        }
    }
}

impl std::fmt::Display for MediaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
