use std::env;
use std::fs::File;
use std::io::Write;
use std::path::Path;

fn main() {
    let out_dir = env::var("OUT_DIR").unwrap();
    let dest_path = Path::new(&out_dir).join("key_codes.rs");
    let mut f = File::create(&dest_path).unwrap();

    // Generate the Key newtype wrapper
    writeln!(
        f,
        r#"
/// Represents a single logical key code as delivered by the host's input decoder.
///
/// Values 0-255 are plain bytes (ASCII characters and control characters).
/// Special keys (cursor and paging keys) live above the byte range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct Key(pub i32);

impl Key {{
    /// Get the raw numeric code value
    pub const fn code(self) -> i32 {{
        self.0
    }}

    /// Get the name of this key
    pub fn name(self) -> String {{
        key_name(self.0)
    }}
}}

impl From<i32> for Key {{
    fn from(code: i32) -> Self {{
        Key(code)
    }}
}}

impl From<u8> for Key {{
    fn from(byte: u8) -> Self {{
        Key(byte as i32)
    }}
}}

impl From<char> for Key {{
    fn from(c: char) -> Self {{
        Key(c as i32)
    }}
}}

impl From<Key> for i32 {{
    fn from(key: Key) -> Self {{
        key.0
    }}
}}

impl fmt::Display for Key {{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {{
        write!(f, "{{}}", self.name())
    }}
}}

impl FromStr for Key {{
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {{
        key_from_name(s).ok_or_else(|| format!("Unknown key: {{}}", s))
    }}
}}
"#
    )
    .unwrap();

    println!("cargo:rerun-if-changed=build.rs");
}
