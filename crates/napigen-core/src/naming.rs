//! Identifier sanitizing for emitted C++.
//!
//! Frontend identifiers become C++ identifiers verbatim unless they collide
//! with a C++ keyword, in which case a single trailing underscore is appended.
//! Boundary keys (the property names seen by JavaScript) always keep the
//! original spelling.
//!
//! | Input | Emitted | Boundary key |
//! |-------|---------|--------------|
//! | `name` | `name` | `"name"` |
//! | `delete` | `delete_` | `"delete"` |

/// C++20 keywords and alternative operator tokens
const CPP_RESERVED: &[&str] = &[
    "alignas",
    "alignof",
    "and",
    "and_eq",
    "asm",
    "auto",
    "bitand",
    "bitor",
    "bool",
    "break",
    "case",
    "catch",
    "char",
    "char8_t",
    "char16_t",
    "char32_t",
    "class",
    "compl",
    "concept",
    "const",
    "consteval",
    "constexpr",
    "constinit",
    "const_cast",
    "continue",
    "co_await",
    "co_return",
    "co_yield",
    "decltype",
    "default",
    "delete",
    "do",
    "double",
    "dynamic_cast",
    "else",
    "enum",
    "explicit",
    "export",
    "extern",
    "false",
    "float",
    "for",
    "friend",
    "goto",
    "if",
    "inline",
    "int",
    "long",
    "mutable",
    "namespace",
    "new",
    "noexcept",
    "not",
    "not_eq",
    "nullptr",
    "operator",
    "or",
    "or_eq",
    "private",
    "protected",
    "public",
    "register",
    "reinterpret_cast",
    "requires",
    "return",
    "short",
    "signed",
    "sizeof",
    "static",
    "static_assert",
    "static_cast",
    "struct",
    "switch",
    "template",
    "this",
    "thread_local",
    "throw",
    "true",
    "try",
    "typedef",
    "typeid",
    "typename",
    "union",
    "unsigned",
    "using",
    "virtual",
    "void",
    "volatile",
    "wchar_t",
    "while",
    "xor",
    "xor_eq",
];

/// An identifier paired with the spelling used in emitted C++.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanitizedName {
    /// Spelling in the frontend source, used for boundary keys
    pub original: String,
    /// Spelling used at every C++ declaration, read and write site
    pub emitted: String,
}

impl SanitizedName {
    pub fn renamed(&self) -> bool {
        self.original != self.emitted
    }
}

/// Detects and resolves collisions with C++ reserved words.
#[derive(Debug, Clone, Copy, Default)]
pub struct NameSanitizer;

impl NameSanitizer {
    pub fn new() -> Self {
        Self
    }

    pub fn is_reserved(&self, identifier: &str) -> bool {
        CPP_RESERVED.contains(&identifier)
    }

    /// Whether `identifier` can be spelled in C++ at all: an ASCII letter or
    /// `_` followed by ASCII letters, digits or `_`.
    pub fn is_identifier(&self, identifier: &str) -> bool {
        let mut chars = identifier.chars();
        chars
            .next()
            .is_some_and(|first| first.is_ascii_alphabetic() || first == '_')
            && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
    }

    /// Append a trailing underscore to reserved identifiers.
    pub fn sanitize(&self, identifier: &str) -> SanitizedName {
        let emitted = if self.is_reserved(identifier) {
            format!("{identifier}_")
        } else {
            identifier.to_string()
        };
        SanitizedName {
            original: identifier.to_string(),
            emitted,
        }
    }
}
