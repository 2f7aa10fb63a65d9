pub mod entities;
pub mod rank;

use std::path::Path;

use clout_core::Corpus;

use crate::output::{CliError, fail_with};

/// Load the corpus at `path`, rendering a coded error on failure.
pub(crate) fn load_corpus(path: &Path) -> anyhow::Result<Corpus> {
    match Corpus::from_path(path) {
        Ok(corpus) => Ok(corpus),
        Err(err) => {
            Err(fail_with(
                &CliError::from(&err),
                format!("could not load corpus {}", path.display()),
            ))
        }
    }
}
