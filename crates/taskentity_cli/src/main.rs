//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `taskentity_core` linkage from a standalone executable.
//! - Show one optimistic update against the recording dispatcher.

use std::sync::Arc;
use taskentity_core::{attrs, AttrValue, EntityHandle, Item, RecordingDispatch};

fn main() {
    println!("taskentity_core ping={}", taskentity_core::ping());
    println!("taskentity_core version={}", taskentity_core::core_version());

    let dispatch = Arc::new(RecordingDispatch::new());
    let mut item = Item::new(taskentity_core::Entity::new(
        attrs([
            ("id", AttrValue::Int(1)),
            ("content", AttrValue::from("demo task")),
            ("checked", AttrValue::flag(false)),
        ]),
        dispatch.clone(),
    ));

    match item.complete(None) {
        Ok(()) => {
            for call in dispatch.calls() {
                let args = AttrValue::Map(call.args);
                println!("dispatched {}.{} {args}", call.resource, call.command);
            }
            println!("local {}", item.describe());
        }
        Err(err) => {
            eprintln!("complete failed: {err}");
            std::process::exit(1);
        }
    }
}
