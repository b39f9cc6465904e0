use std::collections::HashMap;

use crate::error::Error;
use crate::model::{
    Block, DrawingBlock, DrawingMeasure, Fragment, ImageBlock, ImageMeasure, ListBlock, ListMeasure,
    Measure, ParagraphBlock, ParagraphMeasure, TableBlock, TableMeasure,
};

/// Blocks paired with their measures, addressable by block id.
#[derive(Debug)]
pub(crate) struct BlockLookup {
    blocks: Vec<Block>,
    measures: Vec<Measure>,
    by_id: HashMap<String, usize>,
}

impl BlockLookup {
    /// Pair blocks and measures by index. A repeated id resolves to its last
    /// occurrence.
    pub(crate) fn new(blocks: Vec<Block>, measures: Vec<Measure>) -> Result<Self, Error> {
        if blocks.len() != measures.len() {
            return Err(Error::LengthMismatch {
                blocks: blocks.len(),
                measures: measures.len(),
            });
        }
        let by_id = blocks
            .iter()
            .enumerate()
            .map(|(i, b)| (b.id().to_string(), i))
            .collect();
        Ok(BlockLookup {
            blocks,
            measures,
            by_id,
        })
    }

    pub(crate) fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub(crate) fn entry(&self, block_id: &str) -> Option<(&Block, &Measure)> {
        let &i = self.by_id.get(block_id)?;
        Some((&self.blocks[i], &self.measures[i]))
    }

    fn require(&self, block_id: &str) -> Result<(&Block, &Measure), Error> {
        self.entry(block_id).ok_or_else(|| Error::MissingBlock {
            block_id: block_id.to_string(),
        })
    }

    fn mismatch(block_id: &str, expected: &'static str, block: &Block, measure: &Measure) -> Error {
        Error::KindMismatch {
            block_id: block_id.to_string(),
            expected,
            found: format!("{}/{}", block.kind_name(), measure.kind_name()),
        }
    }

    pub(crate) fn paragraph(&self, block_id: &str) -> Result<(&ParagraphBlock, &ParagraphMeasure), Error> {
        match self.require(block_id)? {
            (Block::Paragraph(b), Measure::Paragraph(m)) => Ok((b, m)),
            (b, m) => Err(Self::mismatch(block_id, "paragraph", b, m)),
        }
    }

    pub(crate) fn list(&self, block_id: &str) -> Result<(&ListBlock, &ListMeasure), Error> {
        match self.require(block_id)? {
            (Block::List(b), Measure::List(m)) => Ok((b, m)),
            (b, m) => Err(Self::mismatch(block_id, "list", b, m)),
        }
    }

    pub(crate) fn image(&self, block_id: &str) -> Result<(&ImageBlock, &ImageMeasure), Error> {
        match self.require(block_id)? {
            (Block::Image(b), Measure::Image(m)) => Ok((b, m)),
            (b, m) => Err(Self::mismatch(block_id, "image", b, m)),
        }
    }

    /// Drawings tolerate partial documents: absent or mismatched entries
    /// yield `None` instead of an error.
    pub(crate) fn drawing(&self, block_id: &str) -> Option<(&DrawingBlock, &DrawingMeasure)> {
        match self.entry(block_id)? {
            (Block::Drawing(b), Measure::Drawing(m)) => Some((b, m)),
            _ => None,
        }
    }

    pub(crate) fn table(&self, block_id: &str) -> Option<(&TableBlock, &TableMeasure)> {
        match self.entry(block_id)? {
            (Block::Table(b), Measure::Table(m)) => Some((b, m)),
            _ => None,
        }
    }

    /// Vertical extent of a fragment: its own height when it carries one,
    /// otherwise the measured height of its line range.
    pub(crate) fn fragment_height(&self, fragment: &Fragment) -> f32 {
        if let Some(h) = fragment.explicit_height() {
            return h;
        }
        match fragment {
            Fragment::Para(f) => match self.entry(&f.block_id) {
                Some((_, Measure::Paragraph(m))) => m.range_height(f.from_line, f.to_line),
                _ => 0.0,
            },
            Fragment::ListItem(f) => match self.entry(&f.block_id) {
                Some((_, Measure::List(m))) => m
                    .items
                    .iter()
                    .find(|i| i.item_id == f.item_id)
                    .map(|i| i.paragraph.range_height(f.from_line, f.to_line))
                    .unwrap_or(0.0),
                _ => 0.0,
            },
            Fragment::Image(_) | Fragment::Drawing(_) | Fragment::Table(_) => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn paragraph(id: &str) -> (Block, Measure) {
        let block = serde_json::from_value(json!({ "kind": "paragraph", "id": id, "runs": [] })).unwrap();
        let measure = serde_json::from_value(json!({
            "kind": "paragraph",
            "lines": [
                { "fromRun": 0, "fromChar": 0, "toRun": 0, "toChar": 0, "width": 0,
                  "ascent": 12, "descent": 4, "lineHeight": 16 },
                { "fromRun": 0, "fromChar": 0, "toRun": 0, "toChar": 0, "width": 0,
                  "ascent": 12, "descent": 4, "lineHeight": 20 }
            ],
            "totalHeight": 36
        }))
        .unwrap();
        (block, measure)
    }

    #[test]
    fn rejects_unpaired_inputs() {
        let (b, _) = paragraph("p1");
        let err = BlockLookup::new(vec![b], vec![]).unwrap_err();
        assert!(matches!(err, Error::LengthMismatch { blocks: 1, measures: 0 }));
    }

    #[test]
    fn reports_kind_mismatch() {
        let (b, m) = paragraph("p1");
        let lookup = BlockLookup::new(vec![b], vec![m]).unwrap();
        assert!(lookup.paragraph("p1").is_ok());
        assert!(matches!(lookup.list("p1"), Err(Error::KindMismatch { expected: "list", .. })));
        assert!(matches!(lookup.paragraph("nope"), Err(Error::MissingBlock { .. })));
        assert!(lookup.drawing("p1").is_none());
    }

    #[test]
    fn measures_text_fragments_from_lines() {
        let (b, m) = paragraph("p1");
        let lookup = BlockLookup::new(vec![b], vec![m]).unwrap();
        let frag: Fragment = serde_json::from_value(json!({
            "kind": "para", "blockId": "p1", "fromLine": 1, "toLine": 2, "x": 0, "y": 0, "width": 100
        }))
        .unwrap();
        assert_eq!(lookup.fragment_height(&frag), 20.0);
    }
}
