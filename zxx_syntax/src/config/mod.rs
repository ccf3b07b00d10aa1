//! Configuration for the Zxx syntax crate
//!
//! Limits are generated at build time from `config/<profile>.toml`; user
//! preferences are read at runtime from `ZXX_*` environment variables or a
//! TOML file.

// Generated by build.rs from the selected TOML profile
include!(concat!(env!("OUT_DIR"), "/constants.rs"));

pub mod runtime;

/// Build information and configuration metadata
pub mod build_info {
    /// Returns the configuration profile used during build
    pub fn profile() -> &'static str {
        option_env!("ZXX_BUILD_PROFILE").unwrap_or("development")
    }

    /// Returns the configuration directory used during build
    pub fn config_dir() -> &'static str {
        option_env!("ZXX_CONFIG_DIR").unwrap_or("config")
    }

    pub fn source_info() -> String {
        format!("Generated from {}/{}.toml", config_dir(), profile())
    }
}
