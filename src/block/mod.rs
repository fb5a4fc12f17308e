pub mod block;
pub mod decode;
pub mod roles;

pub use block::{Alignment, Block, ImageBlock, TextBlock};
pub use decode::{
    blocks_from_values, blocks_to_values, decode_block, decode_block_strict,
    decode_blocks_lenient, BlockDecodeError, LenientBlocks, RejectedBlock,
    UnsupportedBlockError,
};
pub use roles::{preset, presets_for, PresetKind, RolePreset, PRESETS};
