/*
This code is part of the geodecode library.
Authors: geodecode contributors
Created: 18/10/2026
Last Modified: 18/10/2026
License: MIT
*/

pub use geodecode_common as common;
pub use geodecode_vector as vector;

pub use geodecode_common::configs::DecoderConfigs;
pub use geodecode_common::error::{DecodeError, DecodeWarning, Result};
pub use geodecode_vector::Shapefile;
