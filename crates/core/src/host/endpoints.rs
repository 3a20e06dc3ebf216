//! Endpoint route table
//!
//! Routes are recorded, not served: matching is exact on method and path.

use std::sync::Arc;

use http::{Method, Request, Response};
use serde::Serialize;

use crate::error::{Error, Result};

/// Request handler attached to a route
pub type Handler = Arc<dyn Fn(&Request<String>) -> Response<String> + Send + Sync>;

/// A registered endpoint
#[derive(Clone)]
pub struct Route {
    pub method: Method,
    pub path: String,
    pub name: Option<String>,
    /// Registration scope the route was added in; 0 when mapped outside any scope
    pub scope: usize,
    handler: Handler,
}

impl Route {
    /// Invoke the handler
    pub fn handle(&self, request: &Request<String>) -> Response<String> {
        (self.handler)(request)
    }
}

impl std::fmt::Debug for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Route")
            .field("method", &self.method)
            .field("path", &self.path)
            .field("name", &self.name)
            .field("scope", &self.scope)
            .finish()
    }
}

/// Serializable view of a route
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteSummary {
    pub method: String,
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl From<&Route> for RouteSummary {
    fn from(route: &Route) -> Self {
        Self {
            method: route.method.to_string(),
            path: route.path.clone(),
            name: route.name.clone(),
        }
    }
}

/// Route table handed to `configure_endpoints`
#[derive(Debug, Clone, Default)]
pub struct EndpointRegistry {
    routes: Vec<Route>,
    scopes: usize,
}

impl EndpointRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for a method and path
    pub fn map<F>(&mut self, method: Method, path: impl Into<String>, handler: F) -> Result<RouteBuilder<'_>>
    where
        F: Fn(&Request<String>) -> Response<String> + Send + Sync + 'static,
    {
        let path = normalize_path(&path.into());
        if self.find(&method, &path).is_some() {
            return Err(Error::DuplicateRoute {
                method: method.to_string(),
                path,
            });
        }

        tracing::debug!("Mapping {} {}", method, path);
        self.routes.push(Route {
            method,
            path,
            name: None,
            scope: self.scopes,
            handler: Arc::new(handler),
        });
        let index = self.routes.len() - 1;
        Ok(RouteBuilder {
            route: &mut self.routes[index],
        })
    }

    pub fn map_get<F>(&mut self, path: impl Into<String>, handler: F) -> Result<RouteBuilder<'_>>
    where
        F: Fn(&Request<String>) -> Response<String> + Send + Sync + 'static,
    {
        self.map(Method::GET, path, handler)
    }

    pub fn map_post<F>(&mut self, path: impl Into<String>, handler: F) -> Result<RouteBuilder<'_>>
    where
        F: Fn(&Request<String>) -> Response<String> + Send + Sync + 'static,
    {
        self.map(Method::POST, path, handler)
    }

    /// Exact-match lookup
    pub fn find(&self, method: &Method, path: &str) -> Option<&Route> {
        let path = normalize_path(path);
        self.routes
            .iter()
            .find(|route| route.method == *method && route.path == path)
    }

    /// Find a route by its name
    pub fn named(&self, name: &str) -> Option<&Route> {
        self.routes
            .iter()
            .find(|route| route.name.as_deref() == Some(name))
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Number of registration scopes opened so far
    pub fn scopes(&self) -> usize {
        self.scopes
    }

    pub(crate) fn begin_scope(&mut self) -> usize {
        self.scopes += 1;
        self.scopes
    }
}

/// Adjusts a route right after it was mapped
pub struct RouteBuilder<'a> {
    route: &'a mut Route,
}

impl RouteBuilder<'_> {
    pub fn with_name(self, name: impl Into<String>) -> Self {
        self.route.name = Some(name.into());
        self
    }
}

fn normalize_path(path: &str) -> String {
    let trimmed = path.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::StatusCode;

    fn ok(body: &'static str) -> impl Fn(&Request<String>) -> Response<String> + Send + Sync + 'static {
        move |_| Response::new(body.to_string())
    }

    #[test]
    fn test_map_and_find() {
        let mut endpoints = EndpointRegistry::new();
        endpoints.map_get("/health", ok("healthy")).unwrap();

        let route = endpoints.find(&Method::GET, "/health").unwrap();
        let request = Request::new(String::new());
        assert_eq!(route.handle(&request).body(), "healthy");
        assert!(endpoints.find(&Method::POST, "/health").is_none());
    }

    #[test]
    fn test_duplicate_route_is_rejected() {
        let mut endpoints = EndpointRegistry::new();
        endpoints.map_get("/metrics", ok("a")).unwrap();

        let result = endpoints.map_get("metrics/", ok("b"));
        assert!(matches!(result, Err(Error::DuplicateRoute { .. })));
        assert!(endpoints.map_post("/metrics", ok("c")).is_ok());
        assert_eq!(endpoints.routes().len(), 2);
    }

    #[test]
    fn test_named_route() {
        let mut endpoints = EndpointRegistry::new();
        endpoints
            .map(Method::DELETE, "/items", |_| {
                let mut response = Response::new(String::new());
                *response.status_mut() = StatusCode::NO_CONTENT;
                response
            })
            .unwrap()
            .with_name("delete-items");

        let route = endpoints.named("delete-items").unwrap();
        assert_eq!(route.method, Method::DELETE);
        let request = Request::new(String::new());
        assert_eq!(route.handle(&request).status(), StatusCode::NO_CONTENT);
    }

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path(""), "/");
        assert_eq!(normalize_path("/"), "/");
        assert_eq!(normalize_path("api/items/"), "/api/items");
    }

    #[test]
    fn test_routes_record_scope() {
        let mut endpoints = EndpointRegistry::new();
        endpoints.map_get("/before", ok("")).unwrap();
        endpoints.begin_scope();
        endpoints.map_get("/inside", ok("")).unwrap();

        assert_eq!(endpoints.routes()[0].scope, 0);
        assert_eq!(endpoints.routes()[1].scope, 1);
        assert_eq!(endpoints.scopes(), 1);
    }

    #[test]
    fn test_route_summary() {
        let mut endpoints = EndpointRegistry::new();
        endpoints.map_get("/", ok("")).unwrap().with_name("root");

        let summary = RouteSummary::from(&endpoints.routes()[0]);
        assert_eq!(summary.method, "GET");
        assert_eq!(summary.name.as_deref(), Some("root"));
    }
}
