use crate::builder::Builder;
use crate::{from_bytes, ErrorKind, Result, Tag, Value};

fn ender_chest(counts_and_names: &[(i8, &str)]) -> Vec<u8> {
    let mut b = Builder::new()
        .start_root()
        .string("identifier", "~local_player")
        .start_list(
            "EnderChestInventory",
            Tag::Compound,
            counts_and_names.len() as i32,
        );

    for (slot, (count, name)) in counts_and_names.iter().enumerate() {
        b = b
            .start_anon_compound()
            .byte("Count", *count)
            .short("Damage", 0)
            .string("Name", name)
            .byte("Slot", slot as i8)
            .byte("WasPickedUp", 0)
            .end_compound();
    }

    b.end_compound().build()
}

#[test]
fn empty_input_has_no_root() -> Result<()> {
    assert_eq!(from_bytes(&[])?, None);
    Ok(())
}

#[test]
fn root_must_be_compound() {
    let payload = Builder::new().int("x", 1).build();
    assert!(from_bytes(&payload).is_err());
}

#[test]
fn truncated_tree_is_an_error() {
    let payload = Builder::new().start_root().int("x", 1).build();
    let err = from_bytes(&payload).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::UnexpectedEof);
}

#[test]
fn builds_nested_tree() -> Result<()> {
    let payload = ender_chest(&[(5, "minecraft:diamond"), (0, "minecraft:air")]);
    let root = from_bytes(&payload)?.unwrap();

    assert_eq!(root.tag(), Tag::Compound);
    assert_eq!(
        root.get("identifier").and_then(Value::as_str),
        Some("~local_player")
    );

    let items = root
        .pointer(&["EnderChestInventory"])
        .and_then(Value::as_list)
        .unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].get("Count").and_then(Value::as_i64), Some(5));
    assert_eq!(
        items[0].get("Name").and_then(Value::as_str),
        Some("minecraft:diamond")
    );
    assert_eq!(items[1].get("Slot"), Some(&Value::Byte(1)));
    Ok(())
}

#[test]
fn pointer_short_circuits() -> Result<()> {
    let payload = Builder::new()
        .start_root()
        .start_compound("a")
        .int("b", 3)
        .end_compound()
        .end_compound()
        .build();
    let root = from_bytes(&payload)?.unwrap();

    assert_eq!(root.pointer(&[]), Some(&root));
    assert_eq!(root.pointer(&["a", "b"]), Some(&Value::Int(3)));
    assert_eq!(root.pointer(&["missing", "b"]), None);
    // `b` is an int, so there is nothing to step into.
    assert_eq!(root.pointer(&["a", "b", "c"]), None);
    Ok(())
}

#[test]
fn integral_widening() {
    assert_eq!(Value::Byte(-1).as_i64(), Some(-1));
    assert_eq!(Value::Short(300).as_i64(), Some(300));
    assert_eq!(Value::Int(70000).as_i64(), Some(70000));
    assert_eq!(Value::Long(1 << 40).as_i64(), Some(1 << 40));
    assert_eq!(Value::Float(1.0).as_i64(), None);
    assert_eq!(Value::String("1".into()).as_i64(), None);
}

#[test]
fn nested_lists() -> Result<()> {
    let payload = Builder::new()
        .start_root()
        .start_list("outer", Tag::List, 2)
        .tag(Tag::Int)
        .int_payload(2)
        .int_payload(1)
        .int_payload(2)
        .tag(Tag::End)
        .int_payload(0)
        .end_compound()
        .build();
    let root = from_bytes(&payload)?.unwrap();

    assert_eq!(
        root.get("outer"),
        Some(&Value::List(vec![
            Value::List(vec![Value::Int(1), Value::Int(2)]),
            Value::List(vec![]),
        ]))
    );
    Ok(())
}

#[test]
fn trailing_data_after_root_is_ignored() -> Result<()> {
    let mut payload = Builder::new().start_root().end_compound().build();
    payload.extend_from_slice(&[1, 2, 3]);

    let root = from_bytes(&payload)?.unwrap();
    assert_eq!(root.as_compound().map(|c| c.len()), Some(0));
    Ok(())
}

/// A root compound followed by `nested` compounds, each inside the last, all
/// closed.
fn nested_compounds(nested: usize) -> Vec<u8> {
    let mut payload = vec![10, 0, 0];
    for _ in 0..nested {
        payload.extend([10, 0, 0]);
    }
    payload.extend(std::iter::repeat(0).take(nested + 1));
    payload
}

#[test]
fn nesting_up_to_the_limit() -> Result<()> {
    let root = from_bytes(&nested_compounds(crate::MAX_DEPTH - 1))?.unwrap();

    let mut depth = 1;
    let mut value = &root;
    while let Some(inner) = value.get("") {
        depth += 1;
        value = inner;
    }
    assert_eq!(depth, crate::MAX_DEPTH);
    Ok(())
}

#[test]
fn nesting_past_the_limit() {
    let err = from_bytes(&nested_compounds(crate::MAX_DEPTH)).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::TooDeep);
}

#[test]
fn deeply_nested_garbage_is_an_error() {
    // Unclosed, and far deeper than the stack could take one frame per level.
    let mut payload = vec![10, 0, 0];
    for _ in 0..200_000 {
        payload.extend([10, 0, 0]);
    }

    let err = from_bytes(&payload).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::TooDeep);
}

#[test]
fn nested_lists_count_towards_the_limit() {
    // Each list holds a single list, down to the limit.
    let mut payload = vec![10, 0, 0, 9, 1, 0, b'l'];
    for _ in 0..crate::MAX_DEPTH {
        payload.extend([9, 1, 0, 0, 0]);
    }

    let err = from_bytes(&payload).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::TooDeep);
}
