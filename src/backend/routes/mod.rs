//! Route Configuration Module
//!
//! This module configures all HTTP routes for the backend server.
//!
//! - **`router`** - Main router creation, fallback and tracing layer
//! - **`api_routes`** - API endpoints, split into public and protected sets
//!
//! # Route Types
//!
//! ## Public
//!
//! - `POST /api/register`
//! - `POST /api/login`
//!
//! ## Protected
//!
//! - `GET /api/user`, `POST /api/logout`
//! - `/api/restaurantes` CRUD and `/api/restaurantes/{id}/avaliacoes`

/// Main router creation
pub mod router;

/// API endpoint handlers
pub mod api_routes;

pub use router::create_router;
