//! Project route table.
//!
//! Mounts the blog application under the configured prefix (`BLOG_PREFIX`):
//!
//! - `{prefix}<int:year>/<int:month>/<int:day>/<int:pk>-<slug:slug>/` - `entry_detail`

use crate::blog;
use crate::routing::UrlConf;
use crate::views::ViewHandle;

/// Root route table with the blog routes included under `blog_prefix`.
///
/// `blog_prefix` is either empty or a route ending in `/`, e.g. `blog/`.
pub fn root_urlconf(blog_prefix: &str) -> UrlConf<ViewHandle> {
    UrlConf::new().include(blog_prefix, blog::urls::urlpatterns())
}
