//! Host collaborators
//!
//! The minimal surface of a web host that modules configure: a service
//! collection before build, and an application with a middleware pipeline
//! and a route table after build.

pub mod application;
pub mod builder;
pub mod endpoints;
pub mod services;

pub use application::{Application, HostReport, ServiceSummary};
pub use builder::HostBuilder;
pub use endpoints::{EndpointRegistry, Handler, Route, RouteBuilder, RouteSummary};
pub use services::{ServiceCollection, ServiceDescriptor, ServiceLifetime, ServiceProvider};
