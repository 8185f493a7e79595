/// A struct containing options for controlling the linking behavior.
#[derive(Debug, Clone)]
pub struct LinkOptions {
    /// If true, creates symbolic links instead of hard links
    pub symbolic: bool,
    /// If true, removes existing destination files
    pub force: bool,
    /// How hard links treat a source that is itself a symbolic link
    pub follow: FollowMode,
    /// If true and creating symbolic links, creates relative symbolic links
    pub relative: bool,
    /// If true, creates backups of existing files
    pub backup: bool,
    /// The suffix to use for backup files
    pub backup_suffix: String,
    /// If true, prints the name of each created link
    pub verbose: bool,
}

/// Whether hard-linking a symbolic-link source refers to the link itself or
/// to the file it resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FollowMode {
    /// Link to the file the symbolic link resolves to (`-L`, the default)
    #[default]
    Dereference,
    /// Link to the symbolic link itself (`-P`)
    Physical,
}

/// Default implementation for LinkOptions
impl Default for LinkOptions {
    fn default() -> Self {
        Self {
            symbolic: false,
            force: false,
            follow: FollowMode::default(),
            relative: false,
            backup: false,
            backup_suffix: String::from("~"),
            verbose: false,
        }
    }
}
