//! Text-backed status enums for projects and tasks.
//!
//! Each variant maps to the exact label stored in the database `estado`
//! column and exchanged over JSON (e.g. `"En Desarrollo"`). The columns carry
//! matching CHECK constraints in the migrations.

/// Define an enum whose variants round-trip through fixed string labels.
///
/// Generates `as_str`, `ALL`, `Display`, `FromStr`, `TryFrom<String>` and
/// string-based serde impls. The first variant listed is the `Default`.
macro_rules! text_enum {
    (
        $(#[$meta:meta])*
        $name:ident ($what:literal) {
            $first:ident => $first_label:literal,
            $( $variant:ident => $label:literal ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        pub enum $name {
            #[default]
            $first,
            $( $variant ),*
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[$name::$first, $( $name::$variant ),*];

            /// The stored / serialized label.
            pub fn as_str(self) -> &'static str {
                match self {
                    $name::$first => $first_label,
                    $( $name::$variant => $label ),*
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::error::CoreError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $name::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str() == s)
                    .ok_or_else(|| {
                        let expected: Vec<&str> = $name::ALL.iter().map(|v| v.as_str()).collect();
                        $crate::error::CoreError::Validation(format!(
                            "'{s}' is not a valid {}; expected one of: {}",
                            $what,
                            expected.join(", ")
                        ))
                    })
            }
        }

        impl TryFrom<String> for $name {
            type Error = $crate::error::CoreError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = <String as serde::Deserialize>::deserialize(deserializer)?;
                raw.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

pub(crate) use text_enum;

text_enum! {
    /// Lifecycle state of a project (`proyectos.estado`).
    ProjectStatus ("project status") {
        Pending => "Pendiente",
        InDevelopment => "En Desarrollo",
        InTesting => "En Pruebas",
        Finished => "Finalizado",
    }
}

text_enum! {
    /// Lifecycle state of a task (`tareas.estado`).
    TaskStatus ("task status") {
        Pending => "Pendiente",
        InProgress => "En Progreso",
        Blocked => "Bloqueada",
        Completed => "Completada",
    }
}
