//! Connected-component labeling of bright pixels in square brightness grids.
//!
//! A [`DisjointSet`] sized to the pixel count merges horizontally and
//! vertically adjacent pixels brighter than a threshold. [`label`] resolves
//! every pixel to its component root and [`cluster_centers`] reduces each
//! component of two or more pixels to the integer mean of its coordinates.
//! [`Labeler`] bundles both steps behind a validated configuration and runs
//! them against any [`GridSource`].
//!
//! # Metrics
//!
//! With the `metrics` feature enabled, [`Labeler::run`] emits:
//!
//! - `labeler_runs` (counter)
//! - `labeler_unions` (counter, disjoint-set calls per run)
//! - `labeler_compressions` (counter, parent rewrites per run)
//! - `labeler_clusters` (histogram, clusters per run)
#![cfg_attr(docsrs, feature(doc_cfg))]

mod builder;
mod disjoint_set;
mod error;
mod grid;
mod label_grid;
mod labeler;
mod result;
mod source;

#[cfg(test)]
mod test_utils;

pub use crate::{
    builder::LabelerBuilder,
    disjoint_set::DisjointSet,
    error::{
        DisjointSetError, DisjointSetErrorCode, GridError, GridErrorCode, LabelError,
        LabelErrorCode, Result,
    },
    grid::Grid,
    label_grid::LabelGrid,
    labeler::{Labeler, cluster_centers, label},
    result::{Centroid, Detection},
    source::GridSource,
};
