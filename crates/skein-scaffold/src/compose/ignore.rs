//! .gitignore

use super::{Artifact, ArtifactKind};
use crate::error::Result;

const GITIGNORE: &str = "\
# Dependencies
node_modules/

# Build output
dist/

# Environment
.env

# Logs
logs/
*.log
npm-debug.log*

# Runtime data
uploads/
data/
";

/// Fixed ignore file; does not vary with any option
pub fn compose_ignore_file() -> Result<Artifact> {
    Ok(Artifact::new(ArtifactKind::IgnoreFile, GITIGNORE))
}
