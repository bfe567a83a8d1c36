//! Blog route table.
//!
//! # Routes
//!
//! - `<int:year>/<int:month>/<int:day>/<int:pk>-<slug:slug>/` - [`EntryDetail`], named `entry_detail`

use std::sync::Arc;

use crate::blog::views::EntryDetail;
use crate::routing::UrlConf;
use crate::views::ViewHandle;

/// Name of the entry detail route.
pub const ENTRY_DETAIL: &str = "entry_detail";

/// Route of a single entry: publication date, then primary key and slug.
pub const ENTRY_DETAIL_ROUTE: &str = "<int:year>/<int:month>/<int:day>/<int:pk>-<slug:slug>/";

/// Builds the blog route table. Mounted without a namespace.
pub fn urlpatterns() -> UrlConf<ViewHandle> {
    let entry_detail: ViewHandle = Arc::new(EntryDetail);

    UrlConf::new().named_path(ENTRY_DETAIL_ROUTE, entry_detail, ENTRY_DETAIL)
}
