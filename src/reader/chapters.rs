//! Sample chapter text shown by the reader

/// One chapter of sample text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chapter {
    pub title: &'static str,
    pub content: &'static str,
}

impl Chapter {
    /// Content split on blank lines
    pub fn paragraphs(&self) -> impl Iterator<Item = &'static str> {
        self.content
            .split("\n\n")
            .map(str::trim)
            .filter(|p| !p.is_empty())
    }
}

pub const SAMPLE_CHAPTERS: [Chapter; 3] = [
    Chapter {
        title: "Chapter 1",
        content: "It was the beginning of a long, long story. On the day he first set out, the sky was clear and blue. Everyone else went about their peaceful routines, but he carried a feeling he had told no one about: curiosity about the unknown world, and a wish to win back a past he had lost.\n\n\"Today I leave this village.\"\n\nWith that decision made, he packed the bare minimum into a small rucksack. He could not find the courage to say goodbye to his family, but he swore to himself that one day he would succeed and come back.",
    },
    Chapter {
        title: "Chapter 2",
        content: "On his third day away from the village he met his first real hardship. His food was gone and his sense of direction was slipping. Deep in a forest that no map showed, he was completely alone.\n\n\"I can't give up here.\"\n\nWhen night fell the forest grew even more unsettling. He could feel creatures he had never seen moving all around him. Then, far off, he saw a faint light. A village, or something else? He crept carefully towards it.",
    },
    Chapter {
        title: "Chapter 3",
        content: "The light came from a small thatched cottage, and the person living there was the forest sage he had heard rumours of. The white-haired old man welcomed him warmly and gave him a meal and a bed.\n\n\"Young man, what is the purpose of your journey?\"\n\nIn answer he told his whole story: the lost family inheritance, the legendary treasure, and the search for who he really was.\n\n\"I see. Perhaps what you are looking for is already inside you.\"\n\nThe old man's words were a riddle, yet somehow they made him feel rescued.",
    },
];

/// Chapter shown on a 1-based page; pages past the last chapter repeat it
pub fn chapter_for_page(page: u32) -> &'static Chapter {
    let last = SAMPLE_CHAPTERS.len() - 1;
    let index = (page.saturating_sub(1) as usize).min(last);
    &SAMPLE_CHAPTERS[index]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chapter_for_page() {
        assert_eq!(chapter_for_page(1).title, "Chapter 1");
        assert_eq!(chapter_for_page(2).title, "Chapter 2");
        assert_eq!(chapter_for_page(3).title, "Chapter 3");
        assert_eq!(chapter_for_page(10).title, "Chapter 3");
        assert_eq!(chapter_for_page(0).title, "Chapter 1");
    }

    #[test]
    fn test_paragraphs() {
        let paragraphs: Vec<&str> = SAMPLE_CHAPTERS[0].paragraphs().collect();
        assert_eq!(paragraphs.len(), 3);
        assert_eq!(paragraphs[1], "\"Today I leave this village.\"");
        assert_eq!(SAMPLE_CHAPTERS[2].paragraphs().count(), 5);
    }
}
