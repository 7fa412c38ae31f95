//! Landmark browser building blocks.
//!
//! A small in-memory data model decoded from a bundled JSON file, an
//! on-demand image scaling cache, pure view-composition functions that
//! produce a host-agnostic view tree, and a navigation shell managing a
//! display stack over the list and detail screens.

pub mod bundle;
pub mod constants;
pub mod error;
pub mod image_store;
pub mod landmark;
pub mod navigation;
pub mod view;

pub use bundle::{AppBundle, ResourceBundle};
pub use error::StoreError;
pub use image_store::{Bitmap, ImageStore, SharedImageStore};
pub use landmark::{load_landmarks, Category, Coordinates, Landmark};
pub use navigation::{Navigator, Screen};
pub use view::View;
