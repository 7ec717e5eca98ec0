//! Schema lookup errors.

use thiserror::Error;

/// Failure to resolve a class the caller depends on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// The package does not declare a class with the requested name.
    #[error("package '{package}' does not declare class '{class}'")]
    MissingClass {
        /// Name of the package that was searched.
        package: String,
        /// Name of the missing class.
        class: String,
    },
}

/// Failure to write a model or package as XML.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SerializeError {
    /// An attribute value holds a character outside the XML 1.0 `Char`
    /// production. Such characters cannot be written even as references.
    #[error("<{element}> attribute '{attribute}' contains U+{code:04X}, which XML 1.0 cannot represent")]
    UnrepresentableChar {
        /// Element being written.
        element: String,
        /// Attribute holding the character.
        attribute: String,
        /// Code point of the character.
        code: u32,
    },
}
