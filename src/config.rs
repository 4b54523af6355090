/// How the encoder resolves `\<x>` when `x` is not `\`, `n` or `t`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EscapeMode {
    /// Unknown escapes collapse to a literal backslash and consume `x`.
    /// Existing STR files were produced this way.
    #[default]
    Compatible,
    /// Unknown escapes keep both the backslash and `x`.
    Strict,
}

/// Options consumed by the chunk encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecOptions {
    pub escapes: EscapeMode,
    /// Written as a raw codepage index for characters the table lacks.
    pub placeholder: u16,
}

impl Default for CodecOptions {
    fn default() -> Self {
        Self {
            escapes: EscapeMode::Compatible,
            placeholder: u16::from(b'_'),
        }
    }
}

/// Runtime configuration for the converter.
#[derive(Debug, Clone)]
pub struct Config {
    /// Codepage file looked up next to the STR file.
    pub codepage_name: String,
    /// Extension of binary string tables.
    pub str_extension: String,
    /// Extension of editable text files.
    pub txt_extension: String,
    pub codec: CodecOptions,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            codepage_name: "MBToUni.dat".to_string(),
            str_extension: "str".to_string(),
            txt_extension: "txt".to_string(),
            codec: CodecOptions::default(),
        }
    }
}
