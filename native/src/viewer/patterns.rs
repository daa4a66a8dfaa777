/// Output document, relative to the source directory.
pub const FILENAME_PATTERN: &str = "%file";
/// Output document, absolute path.
pub const FILENAME_FULLPATH_PATTERN: &str = "%fullfile";
/// Current source line.
pub const LINE_NUMBER_PATTERN: &str = "%line";
/// Selected source file, relative to the source directory.
pub const TEX_FILENAME_PATTERN: &str = "%texfile";
/// Selected source file, absolute path.
pub const TEX_FILENAME_FULLPATH_PATTERN: &str = "%fulltexfile";

/// Values substituted into DDE command templates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandContext {
    pub file: Option<String>,
    pub full_file: Option<String>,
    pub tex_file: Option<String>,
    pub full_tex_file: Option<String>,
    pub line: Option<u32>,
}

impl CommandContext {
    /// Replace every placeholder that has a value; the others stay in the text.
    pub fn expand(&self, template: &str) -> String {
        let mut command = template.to_string();

        if let Some(file) = &self.file {
            // Relative names with spaces are quoted.
            let file = if file.contains(' ') {
                format!("\"{}\"", file)
            } else {
                file.clone()
            };
            command = command.replace(FILENAME_PATTERN, &file);
        }

        if let Some(full_file) = &self.full_file {
            command = command.replace(FILENAME_FULLPATH_PATTERN, full_file);
        }

        if let Some(line) = self.line {
            command = command.replace(LINE_NUMBER_PATTERN, &line.to_string());
        }

        if let Some(tex_file) = &self.tex_file {
            command = command.replace(TEX_FILENAME_PATTERN, tex_file);
        }

        if let Some(full_tex_file) = &self.full_tex_file {
            command = command.replace(TEX_FILENAME_FULLPATH_PATTERN, full_tex_file);
        }

        command
    }
}
