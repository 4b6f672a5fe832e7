//! Identifier word splitting.

/// Split an identifier into ASCII-letter words.
///
/// Capitalised words start a new word (`SignUp` -> `Sign`, `Up`), an all-caps run stays
/// together and gives up its last capital when a capitalised word follows
/// (`UPPERCASESomething` -> `UPPERCASE`, `Something`). Anything that is not an ASCII letter
/// separates words and is dropped.
pub fn split_words(text: &str) -> Vec<&str> {
    let bytes = text.as_bytes();
    let len = bytes.len();
    let mut words = Vec::new();
    let mut i = 0;

    while i < len {
        if !bytes[i].is_ascii_alphabetic() {
            i += 1;
            continue;
        }

        if bytes[i].is_ascii_uppercase() {
            let mut j = i;
            while j < len
                && bytes[j].is_ascii_uppercase()
                && (j + 1 == len || bytes[j + 1].is_ascii_uppercase())
            {
                j += 1;
            }
            if j > i {
                words.push(&text[i..j]);
                i = j;
                continue;
            }
        }

        let mut j = i + 1;
        while j < len && bytes[j].is_ascii_lowercase() {
            j += 1;
        }
        words.push(&text[i..j]);
        i = j;
    }

    words
}

/// Split a class descriptor (`Lcom/app/FooBar;`) into words, ignoring the `L`/`;` wrapping.
pub fn split_descriptor_words(descriptor: &str) -> Vec<&str> {
    let inner = descriptor.trim_start_matches('[');
    let inner = match inner.strip_prefix('L').and_then(|d| d.strip_suffix(';')) {
        Some(stripped) => stripped,
        None => inner,
    };
    split_words(inner)
}
