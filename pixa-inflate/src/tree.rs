//! Canonical prefix-code trees.
//!
//! A code is reconstructed from nothing but a bit-length-per-symbol
//! table: consecutive codewords of each length are handed out in
//! ascending symbol order, starting from the smallest length present
//! (RFC 1951 §3.2.2). The tree itself is an arena of nodes indexed
//! by integer id with the root at index 0, which keeps construction
//! allocation-friendly and decode traversal a pair of array lookups
//! per bit.

use crate::bitstream::BitReader;
use crate::errors::DecodeErrorStatus;

/// Marker for internal nodes.
const NO_SYMBOL: u16 = u16::MAX;

/// Marker for an absent child. The root lives at index 0 and can
/// never be anyone's child, so 0 is free to act as a niche.
const NO_CHILD: u16 = 0;

#[derive(Copy, Clone)]
struct Node
{
    // child ids for a 0 bit and a 1 bit
    children: [u16; 2],
    symbol:   u16
}

impl Default for Node
{
    fn default() -> Self
    {
        Node {
            children: [NO_CHILD; 2],
            symbol:   NO_SYMBOL
        }
    }
}

pub struct PrefixTree
{
    nodes: Vec<Node>
}

impl PrefixTree
{
    /// Build a canonical prefix code from per-symbol code lengths.
    ///
    /// Symbols with a zero length are absent from the tree. A table
    /// whose codes collide (one code a prefix of another) is rejected
    /// as a malformed bitstream.
    pub fn from_lengths(lengths: &[u8]) -> Result<PrefixTree, DecodeErrorStatus>
    {
        let mut tree = PrefixTree {
            nodes: vec![Node::default()]
        };

        let max_length = usize::from(lengths.iter().copied().max().unwrap_or(0));

        if max_length == 0
        {
            // every length is zero, the alphabet is unused in this
            // block and any decode attempt through it will fail
            return Ok(tree);
        }

        let mut bl_count = [0_u16; 16];

        for length in lengths.iter().filter(|x| **x != 0)
        {
            bl_count[usize::from(*length)] += 1;
        }

        // smallest codeword of each length
        let mut next_code = [0_u16; 16];
        let mut code = 0_u16;

        for bits in 1..=max_length
        {
            code = (code + bl_count[bits - 1]) << 1;
            next_code[bits] = code;
        }

        for (symbol, length) in lengths.iter().enumerate()
        {
            if *length != 0
            {
                tree.insert(next_code[usize::from(*length)], *length, symbol as u16)?;
                next_code[usize::from(*length)] += 1;
            }
        }

        Ok(tree)
    }

    /// Insert `symbol` at the leaf reached by walking `codeword`
    /// most-significant bit first for `length` bits.
    fn insert(&mut self, codeword: u16, length: u8, symbol: u16) -> Result<(), DecodeErrorStatus>
    {
        let mut node = 0_usize;

        for i in (0..length).rev()
        {
            if self.nodes[node].symbol != NO_SYMBOL
            {
                // walked through an existing leaf, so some shorter
                // code is a prefix of this one
                return Err(DecodeErrorStatus::MalformedBitstream(
                    "code lengths do not form a prefix code"
                ));
            }

            let bit = usize::from((codeword >> i) & 1);

            let mut next = self.nodes[node].children[bit];

            if next == NO_CHILD
            {
                next = self.nodes.len() as u16;

                self.nodes.push(Node::default());
                self.nodes[node].children[bit] = next;
            }

            node = usize::from(next);
        }

        let leaf = &mut self.nodes[node];

        if leaf.symbol != NO_SYMBOL || leaf.children != [NO_CHILD; 2]
        {
            return Err(DecodeErrorStatus::MalformedBitstream(
                "code lengths do not form a prefix code"
            ));
        }

        leaf.symbol = symbol;

        Ok(())
    }

    /// Decode one symbol by consuming bits until a leaf is reached.
    ///
    /// Terminates after at most the longest code length in the tree.
    pub fn decode_symbol(&self, stream: &mut BitReader) -> Result<u16, DecodeErrorStatus>
    {
        let mut node = &self.nodes[0];

        while node.symbol == NO_SYMBOL
        {
            if node.children == [NO_CHILD; 2]
            {
                return Err(DecodeErrorStatus::MalformedBitstream(
                    "decode through an empty prefix tree"
                ));
            }

            let bit = stream.read_bit()?;

            let next = node.children[usize::from(bit)];

            if next == NO_CHILD
            {
                return Err(DecodeErrorStatus::MalformedBitstream(
                    "codeword not present in prefix tree"
                ));
            }

            node = &self.nodes[usize::from(next)];
        }

        Ok(node.symbol)
    }
}
