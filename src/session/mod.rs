pub(crate) mod lyric_session;
pub(crate) mod project;
