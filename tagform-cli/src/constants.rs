pub const TAGFORM_CLI: &str = "tagform";
