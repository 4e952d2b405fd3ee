//! Virtual environment layout, metadata and activation.

pub mod activation;
pub mod layout;
pub mod pyvenv_cfg;

pub use activation::{activation_env, require_activation_script, subshell_spec, ActivationEnv};
pub use layout::{VenvLayout, BIN_DIR};
pub use pyvenv_cfg::PyvenvCfg;
