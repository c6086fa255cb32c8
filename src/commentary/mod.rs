// External commentary boundary. The engine only knows the trait; the real
// text-generation backend (or the built-in house line) lives behind it.

pub use service::{
    request_commentary, CommentaryRequest, CommentaryService, HouseCommentary,
    COMMENTARY_TIMEOUT, FALLBACK_COMMENTARY,
};

mod service;
