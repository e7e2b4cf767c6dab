use serde::{Deserialize, Deserializer};
use time::Date;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use tracing::warn;

/// Release dates arrive from the provider as ISO `YYYY-MM-DD` strings.
const RELEASE_DATE_FORMAT: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");

/// Metadata-provider record for one multiverse id.
///
/// Fixed-shape and entirely optional per field: provider coverage is
/// partial and grows over time, so a missing record (or a missing field
/// within one) is normal and never an error. The registry attaches this
/// block to a [`Printing`](super::Printing) when the provider has one.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct Enrichment {
    /// Stable logical-identity key; printings sharing it are the same card.
    #[serde(default)]
    pub oracle_id: Option<String>,
    /// Set code as the provider knows it, preferred over the archive's own.
    #[serde(default)]
    pub set_code: Option<String>,
    /// Full set name.
    #[serde(default)]
    pub set_name: Option<String>,
    /// Release date of the printing's set.
    #[serde(default, rename = "released_at", deserialize_with = "release_date")]
    pub released: Option<Date>,
    /// Illustration credit.
    #[serde(default)]
    pub artist: Option<String>,
    /// Collector number within the set.
    #[serde(default)]
    pub collector_number: Option<String>,
    /// Reference to the card image, if the provider has one.
    #[serde(default, rename = "image_url")]
    pub image: Option<String>,
}

/// An unparseable date degrades to "release date unknown" rather than
/// rejecting the whole provider record.
fn release_date<'de, D>(deserializer: D) -> Result<Option<Date>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|value| match Date::parse(&value, RELEASE_DATE_FORMAT) {
        Ok(date) => Some(date),
        Err(err) => {
            warn!(date = %value, %err, "unparseable release date in provider record");
            None
        },
    }))
}
