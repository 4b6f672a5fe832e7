//! Helpers for JVM/dex style type descriptors and class identifiers.
//!
//! Class identifiers are descriptors such as `Lcom/app/Foo;`. Package prefixes are the
//! identifier up to (not including) the last `/`, e.g. `Lcom/app`.

/// Separator between package segments inside a descriptor.
pub const NAME_SEPARATOR: char = '/';

const PRIMITIVES: [char; 9] = ['V', 'Z', 'B', 'S', 'C', 'I', 'J', 'F', 'D'];

/// True if the descriptor denotes a primitive type (including `V`).
pub fn is_primitive(descriptor: &str) -> bool {
    let mut chars = descriptor.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if PRIMITIVES.contains(&c))
}

/// True for array descriptors whose element type is primitive (`[I`, `[[B`, ...).
pub fn is_primitive_array(descriptor: &str) -> bool {
    descriptor.starts_with('[') && is_primitive(descriptor.trim_start_matches('['))
}

/// Class referenced by a field/parameter/return descriptor, with array dimensions removed.
///
/// Returns `None` for primitives and malformed descriptors.
pub fn referenced_class(descriptor: &str) -> Option<&str> {
    let element = descriptor.trim_start_matches('[');
    if element.starts_with('L') && element.ends_with(';') && element.len() > 2 {
        Some(element)
    } else {
        None
    }
}

/// Split a concatenation of type descriptors (`IJLjava/lang/String;[B`) into single types.
///
/// Returns `None` if the sequence is malformed.
pub fn split_type_descriptors(sequence: &str) -> Option<Vec<&str>> {
    let bytes = sequence.as_bytes();
    let mut types = Vec::new();
    let mut start = 0;
    let mut pos = 0;

    while pos < bytes.len() {
        match bytes[pos] {
            b'[' => {
                pos += 1;
                continue;
            }
            b'L' => {
                let end = sequence[pos..].find(';')? + pos;
                pos = end + 1;
            }
            c if PRIMITIVES.contains(&(c as char)) => {
                pos += 1;
            }
            _ => return None,
        }
        types.push(&sequence[start..pos]);
        start = pos;
    }

    if start != bytes.len() {
        // Dangling array marker.
        return None;
    }
    Some(types)
}

/// Parsed method descriptor `(<params>)<return>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDescriptor<'a> {
    pub params: Vec<&'a str>,
    pub returns: &'a str,
}

/// Parse a method descriptor; `None` if it does not have the `(...)R` shape.
pub fn parse_method_descriptor(descriptor: &str) -> Option<MethodDescriptor<'_>> {
    let rest = descriptor.strip_prefix('(')?;
    let close = rest.find(')')?;
    let params = split_type_descriptors(&rest[..close])?;
    let returns = &rest[close + 1..];
    match split_type_descriptors(returns) {
        Some(parsed) if parsed.len() == 1 => Some(MethodDescriptor { params, returns }),
        _ => None,
    }
}

/// Leaf class name of an identifier: `Lcom/app/Foo;` becomes `Foo`.
pub fn class_leaf_name(class_name: &str) -> &str {
    let leaf = match class_name.rfind(NAME_SEPARATOR) {
        Some(idx) => &class_name[idx + 1..],
        None => match referenced_class(class_name) {
            Some(descriptor) => &descriptor[1..],
            None => class_name,
        },
    };
    leaf.strip_suffix(';').unwrap_or(leaf)
}

/// Parent package prefix of a class identifier: `Lcom/app/Foo;` becomes `Lcom/app`.
///
/// Classes without a separator live in the root package, represented by `""`.
pub fn parent_package_prefix(class_name: &str) -> &str {
    match class_name.rfind(NAME_SEPARATOR) {
        Some(idx) => &class_name[..idx],
        None => "",
    }
}

/// Leaf segment of a package prefix: `Lcom/app` becomes `app`.
pub fn package_leaf_name(package_prefix: &str) -> &str {
    match package_prefix.rfind(NAME_SEPARATOR) {
        Some(idx) => &package_prefix[idx + 1..],
        None => package_prefix.strip_prefix('L').unwrap_or(package_prefix),
    }
}

/// Convert a Java binary name (`com.app.Foo`) to a class descriptor (`Lcom/app/Foo;`).
///
/// Values that already look like descriptors are returned unchanged.
pub fn java_to_descriptor(java_name: &str) -> String {
    if java_name.starts_with('L') && java_name.ends_with(';') {
        return java_name.to_string();
    }
    format!("L{};", java_name.replace('.', "/"))
}

/// Convert a class descriptor (`Lcom/app/Foo;`) to a Java binary name (`com.app.Foo`).
pub fn descriptor_to_java(descriptor: &str) -> String {
    let inner = descriptor.strip_prefix('L').and_then(|d| d.strip_suffix(';')).unwrap_or(descriptor);
    inner.replace(NAME_SEPARATOR, ".")
}
