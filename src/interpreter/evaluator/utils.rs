use crate::{
    ast::{PathToNode, SourceRange},
    error::RuntimeError,
    interpreter::{
        evaluator::core::EvalResult,
        value::core::{MemoryItem, Metadata, Value},
    },
};

/// Extends `path` by one child index.
///
/// # Example
/// ```
/// use partscript::interpreter::evaluator::utils::child_path;
///
/// assert_eq!(child_path(&[2, 0], 1), vec![2, 0, 1]);
/// ```
#[must_use]
pub fn child_path(path: &[usize], index: usize) -> PathToNode {
    let mut child = Vec::with_capacity(path.len() + 1);
    child.extend_from_slice(path);
    child.push(index);
    child
}

/// Checks that exactly `expected` arguments were supplied.
///
/// # Errors
/// `ArgumentCountMismatch` naming `name` otherwise.
pub fn check_arity(name: &str,
                   args: &[MemoryItem],
                   expected: usize,
                   range: SourceRange)
                   -> EvalResult<()> {
    if args.len() == expected {
        Ok(())
    } else {
        Err(RuntimeError::ArgumentCountMismatch { name: name.to_string(),
                                                  expected: expected.to_string(),
                                                  found: args.len(),
                                                  range })
    }
}

/// Wraps the result of a call into a memory item.
///
/// Geometry already carries its full lineage, so its own chain is used.
/// Everything else gets the call's metadata.
#[must_use]
pub fn item_for(value: Value, meta: Metadata) -> MemoryItem {
    let chain = value.geometry_meta().to_vec();
    if chain.is_empty() {
        MemoryItem::new(value, meta)
    } else {
        MemoryItem { value,
                     meta: chain }
    }
}

/// Appends `entries` to `chain`, skipping entries already present.
pub fn extend_lineage(chain: &mut Vec<Metadata>, entries: &[Metadata]) {
    for entry in entries {
        if !chain.contains(entry) {
            chain.push(entry.clone());
        }
    }
}
