//! Route tables, path resolution and reversal.
//!
//! A [`UrlConf`] is an ordered list of routes and included route tables. It is
//! compiled once at startup into an immutable [`UrlResolver`]:
//!
//! ```rust,ignore
//! let blog = UrlConf::new()
//!     .named_path("<int:year>/<int:month>/<int:day>/<int:pk>-<slug:slug>/", view, "entry_detail");
//!
//! let resolver = UrlConf::new().include("blog/", blog).compile()?;
//!
//! let matched = resolver.resolve("/blog/2024/3/15/42-hello-world/")?;
//! assert_eq!(matched.resolved.url_name.as_deref(), Some("entry_detail"));
//!
//! let path = resolver.reverse("entry_detail", &matched.resolved.kwargs)?;
//! assert_eq!(path, "/blog/2024/3/15/42-hello-world/");
//! ```
//!
//! # Resolution Order
//!
//! Entries are tried in definition order, depth-first through includes. The
//! first route whose converters accept every capture wins.

use std::fmt;

use serde::Serialize;

use super::converter::PathKwargs;
use super::error::{PatternError, ResolveError, ReverseError};
use super::pattern::RoutePattern;
use crate::utils::path_encoding::encode_path;

/// Builder for a route table.
pub struct UrlConf<V> {
    app_name: Option<String>,
    entries: Vec<ConfEntry<V>>,
}

enum ConfEntry<V> {
    Path {
        route: String,
        view: V,
        name: Option<String>,
    },
    Include {
        route: String,
        conf: UrlConf<V>,
    },
}

impl<V> UrlConf<V> {
    pub fn new() -> Self {
        Self {
            app_name: None,
            entries: Vec::new(),
        }
    }

    /// Sets the namespace this table lives in when included.
    pub fn with_app_name(mut self, app_name: impl Into<String>) -> Self {
        self.app_name = Some(app_name.into());
        self
    }

    /// Adds an unnamed route. It resolves but cannot be reversed.
    pub fn path(mut self, route: impl Into<String>, view: V) -> Self {
        self.entries.push(ConfEntry::Path {
            route: route.into(),
            view,
            name: None,
        });
        self
    }

    /// Adds a route reachable by name through [`UrlResolver::reverse`].
    pub fn named_path(mut self, route: impl Into<String>, view: V, name: impl Into<String>) -> Self {
        self.entries.push(ConfEntry::Path {
            route: route.into(),
            view,
            name: Some(name.into()),
        });
        self
    }

    /// Mounts another table under a route prefix.
    pub fn include(mut self, route: impl Into<String>, conf: UrlConf<V>) -> Self {
        self.entries.push(ConfEntry::Include {
            route: route.into(),
            conf,
        });
        self
    }

    /// Compiles every route.
    ///
    /// # Errors
    ///
    /// Returns the first [`PatternError`] encountered, including parameter
    /// names duplicated between an include prefix and a nested route.
    pub fn compile(self) -> Result<UrlResolver<V>, PatternError> {
        let root = RoutePattern::parse("", false)?;
        let prefix = root.clone();
        let root = compile_node(root, &prefix, self)?;
        let resolver = UrlResolver { root };
        tracing::debug!("Compiled {} route(s)", resolver.route_count());
        Ok(resolver)
    }
}

impl<V> Default for UrlConf<V> {
    fn default() -> Self {
        Self::new()
    }
}

fn compile_node<V>(
    pattern: RoutePattern,
    full_prefix: &RoutePattern,
    conf: UrlConf<V>,
) -> Result<ResolverNode<V>, PatternError> {
    let mut children = Vec::with_capacity(conf.entries.len());

    for entry in conf.entries {
        match entry {
            ConfEntry::Path { route, view, name } => {
                children.push(Node::Route(CompiledRoute {
                    pattern: RoutePattern::parse(&route, true)?,
                    full: full_prefix.join(&route, true)?,
                    name,
                    view,
                }));
            }
            ConfEntry::Include { route, conf } => {
                let pattern = RoutePattern::parse(&route, false)?;
                let prefix = full_prefix.join(&route, false)?;
                children.push(Node::Resolver(compile_node(pattern, &prefix, conf)?));
            }
        }
    }

    Ok(ResolverNode {
        pattern,
        namespace: conf.app_name,
        children,
    })
}

struct ResolverNode<V> {
    /// Prefix relative to the parent table.
    pattern: RoutePattern,
    namespace: Option<String>,
    children: Vec<Node<V>>,
}

enum Node<V> {
    Route(CompiledRoute<V>),
    Resolver(ResolverNode<V>),
}

struct CompiledRoute<V> {
    /// Route relative to the enclosing table, used for matching.
    pattern: RoutePattern,
    /// Route from the root, used for reversing and diagnostics.
    full: RoutePattern,
    name: Option<String>,
    view: V,
}

impl<V> ResolverNode<V> {
    fn resolve<'a>(
        &'a self,
        path: &str,
        namespaces: &[String],
        kwargs: &PathKwargs,
        tried: &mut Vec<String>,
    ) -> Option<ResolverMatch<'a, V>> {
        let Some((rest, own)) = self.pattern.match_path(path) else {
            self.collect_routes(&mut |route| tried.push(route.full.route().to_string()));
            return None;
        };

        let mut kwargs = kwargs.clone();
        kwargs.extend(own);

        let mut namespaces = namespaces.to_vec();
        if let Some(ns) = &self.namespace {
            namespaces.push(ns.clone());
        }

        for child in &self.children {
            match child {
                Node::Route(route) => {
                    if let Some((_, captured)) = route.pattern.match_path(rest) {
                        let mut all = kwargs.clone();
                        all.extend(captured);
                        return Some(ResolverMatch {
                            view: &route.view,
                            resolved: ResolvedRoute {
                                url_name: route.name.clone(),
                                namespaces,
                                route: route.full.route().to_string(),
                                kwargs: all,
                            },
                        });
                    }
                    tried.push(route.full.route().to_string());
                }
                Node::Resolver(node) => {
                    if let Some(found) = node.resolve(rest, &namespaces, &kwargs, tried) {
                        return Some(found);
                    }
                }
            }
        }

        None
    }

    /// Finds the table registered under `namespace`, looking through
    /// includes that do not open a namespace of their own.
    fn find_namespace(&self, namespace: &str) -> Option<&ResolverNode<V>> {
        self.children.iter().find_map(|child| match child {
            Node::Resolver(node) if node.namespace.as_deref() == Some(namespace) => Some(node),
            Node::Resolver(node) if node.namespace.is_none() => node.find_namespace(namespace),
            _ => None,
        })
    }

    /// Routes named `name` that are reachable without entering a namespace.
    fn named_routes<'a>(&'a self, name: &str, out: &mut Vec<&'a CompiledRoute<V>>) {
        for child in &self.children {
            match child {
                Node::Route(route) if route.name.as_deref() == Some(name) => out.push(route),
                Node::Resolver(node) if node.namespace.is_none() => node.named_routes(name, out),
                _ => {}
            }
        }
    }

    fn collect_routes<'a>(&'a self, visit: &mut dyn FnMut(&'a CompiledRoute<V>)) {
        for child in &self.children {
            match child {
                Node::Route(route) => visit(route),
                Node::Resolver(node) => node.collect_routes(visit),
            }
        }
    }

    fn collect_infos(&self, namespaces: &[String], out: &mut Vec<RouteInfo>) {
        let mut namespaces = namespaces.to_vec();
        if let Some(ns) = &self.namespace {
            namespaces.push(ns.clone());
        }

        for child in &self.children {
            match child {
                Node::Route(route) => out.push(RouteInfo {
                    route: route.full.route().to_string(),
                    view_name: route.name.as_deref().map(|name| qualify(&namespaces, name)),
                }),
                Node::Resolver(node) => node.collect_infos(&namespaces, out),
            }
        }
    }
}

/// Compiled, immutable route table.
pub struct UrlResolver<V> {
    root: ResolverNode<V>,
}

impl<V> UrlResolver<V> {
    /// Resolves a request path (starting with `/`) to a view.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError`] listing the full routes tried when nothing
    /// matches, or when `path` does not start with `/`.
    pub fn resolve(&self, path: &str) -> Result<ResolverMatch<'_, V>, ResolveError> {
        let mut tried = Vec::new();

        if let Some(rest) = path.strip_prefix('/')
            && let Some(found) = self.root.resolve(rest, &[], &PathKwargs::new(), &mut tried)
        {
            tracing::debug!(path, route = %found.resolved.route, "Resolved");
            return Ok(found);
        }

        Err(ResolveError {
            path: path.to_string(),
            tried,
        })
    }

    /// Builds the path of a named route.
    ///
    /// `view_name` is either `name` or `namespace:...:name`. The returned path
    /// starts with `/` and is percent-encoded.
    ///
    /// # Errors
    ///
    /// - [`ReverseError::UnknownNamespace`] if a namespace is not registered
    /// - [`ReverseError::NoReverseMatch`] if no route with that name accepts
    ///   `kwargs`
    pub fn reverse(&self, view_name: &str, kwargs: &PathKwargs) -> Result<String, ReverseError> {
        let (namespaces, name) = match view_name.rsplit_once(':') {
            Some((namespaces, name)) => (namespaces.split(':').collect::<Vec<_>>(), name),
            None => (Vec::new(), view_name),
        };

        let mut node = &self.root;
        for ns in namespaces {
            node = node
                .find_namespace(ns)
                .ok_or_else(|| ReverseError::UnknownNamespace(ns.to_string()))?;
        }

        let mut candidates = Vec::new();
        node.named_routes(name, &mut candidates);

        for route in &candidates {
            if let Some(path) = route.full.reverse(kwargs) {
                return Ok(format!("/{}", encode_path(&path)));
            }
        }

        Err(ReverseError::NoReverseMatch {
            view_name: view_name.to_string(),
            tried: candidates
                .iter()
                .map(|route| route.full.route().to_string())
                .collect(),
        })
    }

    /// Flattened view of every route, in resolution order.
    pub fn routes(&self) -> Vec<RouteInfo> {
        let mut out = Vec::new();
        self.root.collect_infos(&[], &mut out);
        out
    }

    pub fn route_count(&self) -> usize {
        let mut count = 0;
        self.root.collect_routes(&mut |_| count += 1);
        count
    }
}

/// A route as listed by [`UrlResolver::routes`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteInfo {
    pub route: String,
    pub view_name: Option<String>,
}

/// Everything known about a resolved request apart from the view itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedRoute {
    pub url_name: Option<String>,
    pub namespaces: Vec<String>,
    /// Full route from the root table.
    pub route: String,
    pub kwargs: PathKwargs,
}

impl ResolvedRoute {
    /// Name usable with [`UrlResolver::reverse`], namespaces included.
    pub fn view_name(&self) -> Option<String> {
        self.url_name
            .as_deref()
            .map(|name| qualify(&self.namespaces, name))
    }
}

/// Result of [`UrlResolver::resolve`].
pub struct ResolverMatch<'r, V> {
    pub view: &'r V,
    pub resolved: ResolvedRoute,
}

impl<V> fmt::Debug for ResolverMatch<'_, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolverMatch")
            .field("resolved", &self.resolved)
            .finish_non_exhaustive()
    }
}

fn qualify(namespaces: &[String], name: &str) -> String {
    if namespaces.is_empty() {
        name.to_string()
    } else {
        format!("{}:{}", namespaces.join(":"), name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::converter::PathValue;

    const ENTRY_ROUTE: &str = "<int:year>/<int:month>/<int:day>/<int:pk>-<slug:slug>/";

    fn entry_kwargs() -> PathKwargs {
        [
            ("year", PathValue::Int(2024)),
            ("month", PathValue::Int(3)),
            ("day", PathValue::Int(15)),
            ("pk", PathValue::Int(42)),
            ("slug", PathValue::from("hello-world")),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
    }

    fn blog_conf() -> UrlConf<&'static str> {
        UrlConf::new()
            .named_path(ENTRY_ROUTE, "entry-view", "entry_detail")
            .named_path("", "index-view", "index")
    }

    #[test]
    fn test_resolve_entry_detail() {
        let resolver = blog_conf().compile().unwrap();
        let found = resolver.resolve("/2024/3/15/42-hello-world/").unwrap();

        assert_eq!(*found.view, "entry-view");
        assert_eq!(found.resolved.url_name.as_deref(), Some("entry_detail"));
        assert_eq!(found.resolved.view_name().as_deref(), Some("entry_detail"));
        assert_eq!(found.resolved.route, ENTRY_ROUTE);
        assert_eq!(found.resolved.kwargs, entry_kwargs());
    }

    #[test]
    fn test_resolve_requires_leading_slash() {
        let resolver = blog_conf().compile().unwrap();
        assert!(resolver.resolve("2024/3/15/42-hello-world/").is_err());
    }

    #[test]
    fn test_resolve_failure_lists_tried_routes() {
        let resolver = blog_conf().compile().unwrap();
        let err = resolver.resolve("/2024/3/15/42-hello-world").unwrap_err();

        assert_eq!(err.path, "/2024/3/15/42-hello-world");
        assert_eq!(err.tried, vec![ENTRY_ROUTE.to_string(), String::new()]);
    }

    #[test]
    fn test_first_matching_route_wins() {
        let resolver = UrlConf::new()
            .named_path("items/<int:id>/", "by-id", "item_by_id")
            .named_path("items/<slug:slug>/", "by-slug", "item_by_slug")
            .compile()
            .unwrap();

        assert_eq!(*resolver.resolve("/items/42/").unwrap().view, "by-id");
        assert_eq!(*resolver.resolve("/items/forty-two/").unwrap().view, "by-slug");
    }

    #[test]
    fn test_include_under_prefix() {
        let resolver = UrlConf::new()
            .include("blog/", blog_conf())
            .compile()
            .unwrap();

        let found = resolver.resolve("/blog/2024/3/15/42-hello-world/").unwrap();
        assert_eq!(found.resolved.route, format!("blog/{ENTRY_ROUTE}"));
        assert!(resolver.resolve("/2024/3/15/42-hello-world/").is_err());

        assert_eq!(
            resolver.reverse("entry_detail", &entry_kwargs()).unwrap(),
            "/blog/2024/3/15/42-hello-world/"
        );
        assert_eq!(resolver.reverse("index", &PathKwargs::new()).unwrap(), "/blog/");
    }

    #[test]
    fn test_include_prefix_captures_are_merged() {
        let resolver = UrlConf::new()
            .include("<slug:lang>/", blog_conf())
            .compile()
            .unwrap();

        let found = resolver.resolve("/en/2024/3/15/42-hello-world/").unwrap();
        assert_eq!(found.resolved.kwargs["lang"], PathValue::from("en"));
        assert_eq!(found.resolved.kwargs["pk"], PathValue::Int(42));

        let mut kwargs = entry_kwargs();
        kwargs.insert("lang".to_string(), "de".into());
        assert_eq!(
            resolver.reverse("entry_detail", &kwargs).unwrap(),
            "/de/2024/3/15/42-hello-world/"
        );
    }

    #[test]
    fn test_duplicate_name_across_include_fails_to_compile() {
        let inner = UrlConf::new().named_path("<int:id>/", "view", "detail");
        let result = UrlConf::new().include("<int:id>/", inner).compile();

        assert!(matches!(result, Err(PatternError::DuplicateParameter { .. })));
    }

    #[test]
    fn test_namespaced_include() {
        let resolver = UrlConf::new()
            .include("blog/", blog_conf().with_app_name("blog"))
            .compile()
            .unwrap();

        let found = resolver.resolve("/blog/").unwrap();
        assert_eq!(found.resolved.namespaces, vec!["blog".to_string()]);
        assert_eq!(found.resolved.view_name().as_deref(), Some("blog:index"));

        assert_eq!(
            resolver.reverse("blog:entry_detail", &entry_kwargs()).unwrap(),
            "/blog/2024/3/15/42-hello-world/"
        );
        assert!(matches!(
            resolver.reverse("entry_detail", &entry_kwargs()),
            Err(ReverseError::NoReverseMatch { .. })
        ));
        assert_eq!(
            resolver.reverse("news:index", &PathKwargs::new()),
            Err(ReverseError::UnknownNamespace("news".to_string()))
        );
    }

    #[test]
    fn test_nested_namespaces() {
        let inner = UrlConf::new()
            .named_path("<int:pk>/", "comment-view", "comment")
            .with_app_name("comments");
        let blog = UrlConf::new()
            .include("comments/", inner)
            .with_app_name("blog");
        let resolver = UrlConf::new().include("blog/", blog).compile().unwrap();

        let found = resolver.resolve("/blog/comments/7/").unwrap();
        assert_eq!(
            found.resolved.view_name().as_deref(),
            Some("blog:comments:comment")
        );

        let kwargs: PathKwargs = [("pk".to_string(), PathValue::Int(7))].into_iter().collect();
        assert_eq!(
            resolver.reverse("blog:comments:comment", &kwargs).unwrap(),
            "/blog/comments/7/"
        );
    }

    #[test]
    fn test_reverse_no_match_reports_candidates() {
        let resolver = blog_conf().compile().unwrap();
        let mut kwargs = entry_kwargs();
        kwargs.remove("slug");

        assert_eq!(
            resolver.reverse("entry_detail", &kwargs),
            Err(ReverseError::NoReverseMatch {
                view_name: "entry_detail".to_string(),
                tried: vec![ENTRY_ROUTE.to_string()],
            })
        );
        assert!(matches!(
            resolver.reverse("missing", &PathKwargs::new()),
            Err(ReverseError::NoReverseMatch { tried, .. }) if tried.is_empty()
        ));
    }

    #[test]
    fn test_reverse_percent_encodes_values() {
        let resolver = UrlConf::new()
            .named_path("search/<str:query>/", "search-view", "search")
            .compile()
            .unwrap();

        let kwargs: PathKwargs = [("query".to_string(), PathValue::from("rust lang?"))]
            .into_iter()
            .collect();
        assert_eq!(
            resolver.reverse("search", &kwargs).unwrap(),
            "/search/rust%20lang%3F/"
        );
    }

    #[test]
    fn test_unnamed_route_resolves_but_does_not_reverse() {
        let resolver = UrlConf::new()
            .path("about/", "about-view")
            .compile()
            .unwrap();

        let found = resolver.resolve("/about/").unwrap();
        assert_eq!(found.resolved.view_name(), None);
        assert_eq!(resolver.route_count(), 1);
    }

    #[test]
    fn test_routes_listing() {
        let resolver = UrlConf::new()
            .include("blog/", blog_conf().with_app_name("blog"))
            .path("about/", "about-view")
            .compile()
            .unwrap();

        assert_eq!(
            resolver.routes(),
            vec![
                RouteInfo {
                    route: format!("blog/{ENTRY_ROUTE}"),
                    view_name: Some("blog:entry_detail".to_string()),
                },
                RouteInfo {
                    route: "blog/".to_string(),
                    view_name: Some("blog:index".to_string()),
                },
                RouteInfo {
                    route: "about/".to_string(),
                    view_name: None,
                },
            ]
        );
        assert_eq!(resolver.route_count(), 3);
    }
}
