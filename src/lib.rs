//! # svnsteward
//!
//! Synchronizes Subversion repository access control with a Redmine project
//! database. Reads project and membership records, makes sure every project
//! has a repository under the SVN root, and writes a path-based AuthZ file
//! mapping users to per-project read/read-write groups.
//!
//! ## Library Usage
//!
//! ```rust,ignore
//! use std::path::PathBuf;
//! use svnsteward::config::RunConfig;
//! use svnsteward::store::SqliteStore;
//! use svnsteward::svn::CommandSvnAdmin;
//! use svnsteward::types::RolePolicy;
//!
//! let store = SqliteStore::open(&PathBuf::from("./redmine.db")).unwrap();
//! let config = RunConfig {
//!     database: PathBuf::from("./redmine.db"),
//!     svn_root: PathBuf::from("/svn"),
//!     output_file: PathBuf::from("/svn/access.authZ"),
//!     policy: RolePolicy::new(vec![4], vec![3]),
//!     create_missing: true,
//!     verbose: false,
//! };
//! let report = svnsteward::sync::run(&config, &store, &CommandSvnAdmin).unwrap();
//! println!("created {} repositories", report.created);
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` (default): Pulls in clap for the binary. Disable with
//!   `default-features = false` when embedding as a library.

pub mod authz;
pub mod config;
pub mod error;
pub mod reconcile;
pub mod store;
pub mod svn;
pub mod sync;
pub mod types;
