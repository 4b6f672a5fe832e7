use classmatch_core::model::descriptor::{
    class_leaf_name, descriptor_to_java, is_primitive, is_primitive_array, java_to_descriptor,
    package_leaf_name, parent_package_prefix, parse_method_descriptor, referenced_class,
    split_type_descriptors,
};

#[test]
fn class_leaf_name_strips_package_and_terminator() {
    assert_eq!(class_leaf_name("Lcom/app/MainActivity;"), "MainActivity");
    assert_eq!(class_leaf_name("LRoot;"), "Root");
    assert_eq!(class_leaf_name("Lcom/app/Outer$Inner;"), "Outer$Inner");
}

#[test]
fn class_leaf_name_keeps_plain_names_starting_with_l() {
    assert_eq!(class_leaf_name("Lambda"), "Lambda");
}

#[test]
fn parent_package_prefix_uses_last_separator() {
    assert_eq!(parent_package_prefix("Lcom/app/Foo;"), "Lcom/app");
    assert_eq!(parent_package_prefix("Lcom/Foo;"), "Lcom");
    assert_eq!(parent_package_prefix("LFoo;"), "");
}

#[test]
fn package_leaf_name_returns_last_segment() {
    assert_eq!(package_leaf_name("Lcom/app"), "app");
    assert_eq!(package_leaf_name("Lcom"), "com");
    assert_eq!(package_leaf_name(""), "");
}

#[test]
fn java_and_descriptor_forms_convert_both_ways() {
    assert_eq!(java_to_descriptor("com.app.Foo"), "Lcom/app/Foo;");
    assert_eq!(java_to_descriptor("Lcom/app/Foo;"), "Lcom/app/Foo;");
    assert_eq!(descriptor_to_java("Lcom/app/Foo;"), "com.app.Foo");
}

#[test]
fn primitives_and_arrays_are_recognised() {
    assert!(is_primitive("I"));
    assert!(is_primitive("V"));
    assert!(!is_primitive("II"));
    assert!(!is_primitive("Lcom/app/Foo;"));
    assert!(is_primitive_array("[I"));
    assert!(is_primitive_array("[[B"));
    assert!(!is_primitive_array("[Lcom/app/Foo;"));
}

#[test]
fn referenced_class_strips_array_dimensions() {
    assert_eq!(referenced_class("[[Lcom/app/Foo;"), Some("Lcom/app/Foo;"));
    assert_eq!(referenced_class("Lcom/app/Foo;"), Some("Lcom/app/Foo;"));
    assert_eq!(referenced_class("I"), None);
    assert_eq!(referenced_class("L;"), None);
}

#[test]
fn split_type_descriptors_handles_mixed_sequences() {
    let types = split_type_descriptors("IJLjava/lang/String;[B[[Lcom/app/Foo;").expect("valid sequence");
    assert_eq!(types, vec!["I", "J", "Ljava/lang/String;", "[B", "[[Lcom/app/Foo;"]);
    assert_eq!(split_type_descriptors(""), Some(vec![]));
}

#[test]
fn split_type_descriptors_rejects_malformed_input() {
    assert_eq!(split_type_descriptors("Lcom/app/Foo"), None);
    assert_eq!(split_type_descriptors("I["), None);
    assert_eq!(split_type_descriptors("X"), None);
}

#[test]
fn parse_method_descriptor_splits_params_and_return() {
    let parsed = parse_method_descriptor("(ILjava/lang/String;)V").expect("valid descriptor");
    assert_eq!(parsed.params, vec!["I", "Ljava/lang/String;"]);
    assert_eq!(parsed.returns, "V");

    let no_params = parse_method_descriptor("()Lcom/app/Foo;").expect("valid descriptor");
    assert!(no_params.params.is_empty());
    assert_eq!(no_params.returns, "Lcom/app/Foo;");
}

#[test]
fn parse_method_descriptor_rejects_bad_shapes() {
    assert!(parse_method_descriptor("I)V").is_none());
    assert!(parse_method_descriptor("(I").is_none());
    assert!(parse_method_descriptor("(I)").is_none());
    assert!(parse_method_descriptor("(I)VV").is_none());
}
