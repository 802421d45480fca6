//! Macros for defining kind enums.

/// Macro for defining a kind enum with human-readable labels.
///
/// Variants are (de)serialized and parsed in their `lowercase` form, while
/// [`label()`] provides the text shown to a member.
///
/// # Example
///
/// ```rust
/// # use common::define_kind;
///
/// define_kind! {
///     #[doc = "Shape kind."]
///     enum Kind {
///         #[doc = "A cube"]
///         #[label = "Cubo"]
///         Cube,
///
///         #[doc = "A sphere"]
///         #[label = "Esfera"]
///         Sphere,
///     }
/// }
///
/// assert_eq!(Kind::Cube.to_string(), "cube");
/// assert_eq!(Kind::Sphere.label(), "Esfera");
/// assert_eq!(Kind::label_of("cube"), "Cubo");
/// assert_eq!(Kind::label_of("pyramid"), "pyramid");
/// ```
///
/// [`label()`]: Kind::label
#[expect(clippy::module_name_repetitions, reason = "more readable")]
#[macro_export]
macro_rules! define_kind {
    (
        #[doc = $doc:literal]
        enum $name:ident {
            $(
                #[doc = $variant_doc:literal]
                #[label = $label:literal]
                $variant:ident
            ),* $(,)?
        }
    ) => {
        #[derive(
            Clone,
            Copy,
            Debug,
            $crate::private::serde::Deserialize,
            $crate::private::strum::Display,
            $crate::private::strum::EnumString,
            Eq,
            Hash,
            Ord,
            PartialEq,
            PartialOrd,
            $crate::private::serde::Serialize,
        )]
        #[doc = $doc]
        #[serde(rename_all = "lowercase")]
        #[strum(serialize_all = "lowercase")]
        pub enum $name {
            $(
                 #[doc = $variant_doc]
                 $variant,
            )*
        }

        impl $name {
            /// Returns the human-readable label of this kind.
            #[must_use]
            pub const fn label(self) -> &'static str {
                match self {
                    $(
                        Self::$variant => $label,
                    )*
                }
            }

            /// Maps the provided raw value to its human-readable label.
            ///
            /// Unrecognized values are returned as is.
            #[must_use]
            pub fn label_of(raw: &str) -> ::std::borrow::Cow<'_, str> {
                raw.parse::<Self>().map_or(
                    ::std::borrow::Cow::Borrowed(raw),
                    |kind| ::std::borrow::Cow::Borrowed(kind.label()),
                )
            }
        }
    };
}
