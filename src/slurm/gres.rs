// src/slurm/gres.rs

//! Coarse accelerator counts from SLURM generic resource strings.
//!
//! Handles the shapes `squeue -o %b` and `sinfo -o %G` actually print:
//! `gpu:4`, `gpu:a100:4`, `gres/gpu:2`, `gres:gpu:a100:2`,
//! `gpu:a100:4(S:0-1)`, `gpu:2,shard:8` and `N/A`.

/// Text between the first `gpu:` and the next `,` / `(`, if any.
fn gpu_token(gres: &str) -> Option<&str> {
    let start = gres.find("gpu:")? + "gpu:".len();
    let rest = &gres[start..];
    let end = rest.find([',', '(']).unwrap_or(rest.len());
    Some(rest[..end].trim())
}

/// Number of accelerators requested by a resource string; 0 when there is no
/// `gpu:` token or its count is not a number.
pub fn accelerator_count(gres: &str) -> u32 {
    gpu_type_and_count(gres).1
}

/// Accelerator type (possibly empty) and count.
///
/// `gpu:a100:4` → `("a100", 4)`, `gpu:4` → `("", 4)`.
pub fn gpu_type_and_count(gres: &str) -> (String, u32) {
    let Some(token) = gpu_token(gres) else {
        return (String::new(), 0);
    };

    match token.rsplit_once(':') {
        Some((kind, count)) => (kind.to_string(), count.trim().parse().unwrap_or(0)),
        None => (String::new(), token.parse().unwrap_or(0)),
    }
}
