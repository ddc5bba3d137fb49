//! tsconfig.json

use super::{Artifact, ArtifactKind};
use crate::error::{Result, ScaffoldError};
use serde_json::json;

pub fn compose_tsconfig() -> Result<Artifact> {
    let config = json!({
        "compilerOptions": {
            "target": "ES2022",
            "module": "NodeNext",
            "moduleResolution": "NodeNext",
            "outDir": "dist",
            "rootDir": "src",
            "strict": true,
            "esModuleInterop": true,
            "skipLibCheck": true,
            "forceConsistentCasingInFileNames": true,
            "resolveJsonModule": true,
            "sourceMap": true
        },
        "include": ["src/**/*.ts"],
        "exclude": ["node_modules", "dist"]
    });

    let mut contents = serde_json::to_string_pretty(&config)
        .map_err(|e| ScaffoldError::serialize("tsconfig.json", e))?;
    contents.push('\n');

    Ok(Artifact::new(ArtifactKind::CompilerConfig, contents))
}
