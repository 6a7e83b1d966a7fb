/// Builds a `Component` with a terse field-assignment list, mirroring the
/// corpus's `build_property_from_ical!` test-builder convention.
#[macro_export]
macro_rules! build_component {
    ($kind:expr, $uid:expr $(, $field:ident = $value:expr)* $(,)?) => {{
        let mut component = $crate::component::Component::new($kind, $uid);
        $(component.$field = $value;)*
        component
    }};
}

pub use build_component;
