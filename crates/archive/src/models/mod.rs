mod comment;
mod enrichment;
mod printing;

pub use self::comment::Comment;
pub use self::enrichment::Enrichment;
pub use self::printing::Printing;
