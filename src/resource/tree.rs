use tracing::trace;

use super::{Navigator, SubBlock, vs_header::VSHeader};

/// Walks a [`VS_VERSIONINFO`](https://learn.microsoft.com/windows/win32/menurc/vs-versioninfo)
/// tree in memory, answering queries the same way `VerQueryValueW` does.
///
/// * `\` addresses the value of the root structure, which is the `VS_FIXEDFILEINFO`.
/// * Every other segment selects the child whose key matches it, ignoring ASCII case.
/// * Empty segments are skipped, so `\VarFileInfo\\Translation\` is the same as
///   `\VarFileInfo\Translation`.
/// * The reported length is in UTF-16 code units for text values and in bytes otherwise.
///
/// The walk itself never reads outside the block. A value whose header claims more data than the
/// block holds is still reported as-is, so the caller can tell a corrupt resource from a missing
/// value.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct TreeNavigator;

impl Navigator for TreeNavigator {
    fn query(&self, block: &[u8], sub_block: &str) -> Option<SubBlock> {
        let root = VSHeader::parse(block, 0)?;

        let node = sub_block
            .split('\\')
            .filter(|segment| !segment.is_empty())
            .try_fold(root, |node, segment| {
                node.children(block)
                    .find(|child| child.key_matches(segment))
            })?;

        // An empty value may sit at the very end of a structure that has no trailing padding
        let offset = if node.value_length == 0 {
            node.value_offset.min(node.end())
        } else {
            node.value_offset
        };

        trace!(sub_block, offset, length = node.value_length);

        Some(SubBlock {
            offset,
            length: node.value_length.into(),
        })
    }
}
