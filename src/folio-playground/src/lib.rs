//! Folio Playground - Examples
//!
//! This crate provides executable apps for experimenting with Folio.
//!
//! # Available Binaries
//!
//! - **`articles-demo`**: builds an article collection, prints it, destroys it
//!
//! # Usage
//!
//! ```bash
//! cargo run --package folio-playground --bin articles-demo
//! cargo run --package folio-playground --bin articles-demo -- \
//!     --article "Dune=1965" --article "Solaris=1961"
//! ```

pub mod data;

pub use data::{SampleArticles, parse_article, sample_articles};
