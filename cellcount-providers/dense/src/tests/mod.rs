pub(crate) use super::{DenseGridProvider, DenseGridProviderError};

mod support;
