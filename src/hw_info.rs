//! Hardware capability probe.
//!
//! Collects the ISA feature set and core count recorded by runtime
//! initialization.

use std::fmt;

use serde::Serialize;

/// ISA feature set relevant to byte-lookup kernels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct IsaFeatures {
    pub sse2: bool,
    pub ssse3: bool,
    pub avx2: bool,
    pub avx512bw: bool,
    pub neon: bool,
}

impl fmt::Display for IsaFeatures {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut feats = Vec::new();
        if self.avx512bw {
            feats.push("AVX-512BW");
        }
        if self.avx2 {
            feats.push("AVX2");
        }
        if self.ssse3 {
            feats.push("SSSE3");
        }
        if self.sse2 {
            feats.push("SSE2");
        }
        if self.neon {
            feats.push("NEON");
        }
        if feats.is_empty() {
            feats.push("Scalar");
        }
        write!(f, "{}", feats.join("+"))
    }
}

impl IsaFeatures {
    pub fn detect() -> Self {
        detect_isa_features()
    }
}

/// Number of logical cores visible to this process.
pub fn logical_cores() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

#[cfg(target_arch = "x86_64")]
fn detect_isa_features() -> IsaFeatures {
    IsaFeatures {
        sse2: is_x86_feature_detected!("sse2"),
        ssse3: is_x86_feature_detected!("ssse3"),
        avx2: is_x86_feature_detected!("avx2"),
        avx512bw: is_x86_feature_detected!("avx512bw"),
        neon: false,
    }
}

#[cfg(target_arch = "aarch64")]
fn detect_isa_features() -> IsaFeatures {
    IsaFeatures {
        neon: std::arch::is_aarch64_feature_detected!("neon"),
        ..IsaFeatures::default()
    }
}

#[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
fn detect_isa_features() -> IsaFeatures {
    IsaFeatures::default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_isa_detect() {
        let isa = IsaFeatures::detect();
        #[cfg(target_arch = "x86_64")]
        assert!(isa.sse2, "SSE2 is baseline on x86_64");
        eprintln!("ISA: {isa}");
    }

    #[test]
    fn test_display_scalar_fallback() {
        assert_eq!(IsaFeatures::default().to_string(), "Scalar");
        let isa = IsaFeatures {
            sse2: true,
            avx2: true,
            ..IsaFeatures::default()
        };
        assert_eq!(isa.to_string(), "AVX2+SSE2");
    }

    #[test]
    fn test_logical_cores() {
        assert!(logical_cores() >= 1);
    }
}
