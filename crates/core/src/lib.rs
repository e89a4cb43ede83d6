pub mod collect;
pub mod error;
pub mod exhibitor;
pub mod extract;
#[cfg(feature = "fetch")]
pub mod fetch;
pub mod formatters;
pub mod harvest;
pub mod page;
pub mod profile;
pub mod progress;
pub mod scroll;
pub mod selectors;
pub mod static_page;
#[cfg(feature = "webdriver")]
pub mod webdriver;

pub use collect::{Acceptance, Collector};
pub use error::{ExpositorError, Result};
pub use exhibitor::{Exhibitor, FLAT_COLUMNS, FlatExhibitor, flat_view};
pub use extract::{CardOutcome, SkipReason, extract_card};
#[cfg(feature = "fetch")]
pub use fetch::{FetchConfig, fetch_file, fetch_stdin, fetch_url, fetch_url_with_config};
pub use formatters::{CsvConfig, JsonConfig, records_to_csv, records_to_json};
pub use harvest::{
    DEFAULT_URL, Harvest, HarvestConfig, HarvestConfigBuilder, HarvestStats, Harvester, harvest,
    harvest_with_config,
};
pub use page::{CardHandle, DirectoryPage};
pub use profile::SiteProfile;
pub use progress::{NullProgress, Progress};
pub use scroll::{STALL_THRESHOLD, ScrollConfig, ScrollOutcome, ScrollSummary, settle_cards};
pub use selectors::{FieldSelectors, combined};
pub use static_page::{StaticCard, StaticPage};
#[cfg(feature = "webdriver")]
pub use webdriver::{WebDriverCard, WebDriverConfig, WebDriverPage};
