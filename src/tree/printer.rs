//! Human-readable rendering of a merkle tree
//!
//! Each node becomes one line: two spaces per level of depth, a branch
//! marker, then the full hex digest. Left children (and the root) use
//! `├─ `, right children use `└─ `.

use super::{MerkleTree, Visit};
use crate::config::TreeConfig;
use crate::model::TransactionPayloads;
use crate::Result;
use std::io::{self, Write};

/// Marker for the root and for left children
pub const LEFT_MARKER: &str = "├─ ";
/// Marker for right children
pub const RIGHT_MARKER: &str = "└─ ";
/// Indentation added per level of depth
pub const INDENT: &str = "  ";
/// Header written before a block's tree
pub const BLOCK_HEADER: &str = "Merkle Tree:";

/// Format a single traversal step as a line (without trailing newline)
pub fn format_visit(visit: &Visit) -> String {
    let marker = if visit.is_left {
        LEFT_MARKER
    } else {
        RIGHT_MARKER
    };
    format!("{}{}{}", INDENT.repeat(visit.depth), marker, visit.digest)
}

/// Write one line per node, in preorder
pub fn write_tree<W: Write>(tree: &MerkleTree, mut writer: W) -> io::Result<()> {
    for visit in tree.preorder() {
        writeln!(writer, "{}", format_visit(&visit))?;
    }
    writer.flush()
}

/// Render the tree into a string
pub fn render_tree(tree: &MerkleTree) -> String {
    tree.preorder()
        .map(|visit| format_visit(&visit) + "\n")
        .collect()
}

/// Print the tree to standard output
pub fn print_tree(tree: &MerkleTree) -> io::Result<()> {
    let stdout = io::stdout();
    write_tree(tree, stdout.lock())
}

/// Build a block's tree and write it under a `Merkle Tree:` header
pub fn write_block_tree<B, W>(block: &B, config: &TreeConfig, mut writer: W) -> Result<MerkleTree>
where
    B: TransactionPayloads + ?Sized,
    W: Write,
{
    let tree = MerkleTree::from_block(block, config)?;
    writeln!(writer, "{}", BLOCK_HEADER)?;
    write_tree(&tree, writer)?;
    Ok(tree)
}

/// Build a block's tree and print it to standard output
pub fn print_block_tree<B>(block: &B, config: &TreeConfig) -> Result<MerkleTree>
where
    B: TransactionPayloads + ?Sized,
{
    let stdout = io::stdout();
    write_block_tree(block, config, stdout.lock())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::HashAlgorithm;
    use crate::Error;

    #[test]
    fn test_two_leaf_rendering() {
        let tree = MerkleTree::build([b"a", b"b"]).unwrap();
        let sha = HashAlgorithm::Sha256;
        let expected = format!(
            "├─ {}\n  ├─ {}\n  └─ {}\n",
            tree.root_hash(),
            sha.digest(b"a"),
            sha.digest(b"b")
        );
        assert_eq!(render_tree(&tree), expected);
    }

    #[test]
    fn test_one_line_per_node() {
        let tree = MerkleTree::build([b"a", b"b", b"c", b"d", b"e", b"f", b"g"]).unwrap();
        let mut out = Vec::new();
        write_tree(&tree, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), tree.node_count());
        assert_eq!(lines.len(), 15);
        for line in lines {
            let digest = line
                .trim_start()
                .trim_start_matches(LEFT_MARKER)
                .trim_start_matches(RIGHT_MARKER);
            assert_eq!(digest.len(), 64);
            assert!(digest.chars().all(|c| c.is_ascii_hexdigit()));
        }
    }

    #[test]
    fn test_write_matches_render() {
        let tree = MerkleTree::build([b"x", b"y", b"z"]).unwrap();
        let mut out = Vec::new();
        write_tree(&tree, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), render_tree(&tree));
    }

    #[test]
    fn test_block_rendering_has_header() {
        let block = vec![b"tx".to_vec()];
        let mut out = Vec::new();
        let tree = write_block_tree(&block, &TreeConfig::default(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Merkle Tree:\n"));
        assert_eq!(text.lines().count(), 1 + tree.node_count());
    }

    #[test]
    fn test_empty_block_writes_nothing() {
        let block: Vec<Vec<u8>> = Vec::new();
        let mut out = Vec::new();
        let err = write_block_tree(&block, &TreeConfig::default(), &mut out).unwrap_err();
        assert!(matches!(err, Error::EmptyInput));
        assert!(out.is_empty());
    }

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_sink_failure_propagates() {
        let tree = MerkleTree::build([b"a"]).unwrap();
        let err = write_tree(&tree, FailingWriter).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }
}
