pub mod catalog;
pub mod config;
pub mod error;
pub mod filter;
pub mod loader;
pub mod option;
pub mod pointer;
pub mod row;
pub mod select;

pub use catalog::CatalogItem;
pub use config::MatpickConfig;
pub use error::{PickError, Result};
pub use filter::{cap_matches, filter_options, option_matches, CappedMatches, MAX_RENDERED_RESULTS};
pub use loader::{load_form, load_options, parse_options, FieldSpec, FormSpec};
pub use option::{find_option, OptionId, OptionKeys, PickOption};
pub use pointer::{ListenerId, PointerHub, PointerSubscription, Region};
pub use row::{format_price, OptionRow, RowRenderer};
pub use select::{
    ChangeEvent, EmptyState, ListRow, ListView, SearchableSelect, SelectConfig, SelectProps,
};
