//! Common constants used throughout the srvgen application.

/// Supported options manifest file names, tried in order
pub const CONFIG_FILES: [&str; 3] = ["srvgen.json", "srvgen.yml", "srvgen.yaml"];

/// srvgen's ignore file name
pub const IGNORE_FILE: &str = ".srvgenignore";

/// Suffix marking a file in the template root as a template
pub const TEMPLATE_SUFFIX: &str = "_tpl";

/// Name of the generated schema file handed to the schema compiler
pub const SCHEMA_FILE: &str = "messages.proto";

/// File stem reserved for the plain (in-language) message definitions
pub const MESSAGES_STEM: &str = "messages";
