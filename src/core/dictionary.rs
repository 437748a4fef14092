//! # Character Repository
//!
//! Maps a character to its `CharacterRecord`. The only implementation is an
//! offline table with an artificial delay that keeps the loading skeleton
//! visible for a moment. Lookups never fail: unknown characters get a
//! fallback record that points the learner at characters that do exist.
//!
//! Extra entries can be merged in from a JSON file (an array of records),
//! overriding built-ins with the same character.

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info};

use crate::core::record::CharacterRecord;

/// Pinyin used by the fallback record.
pub const UNKNOWN_PINYIN: &str = "Unknown";

pub const DEFAULT_LOOKUP_DELAY: Duration = Duration::from_millis(400);

#[async_trait]
pub trait CharacterRepository: Send + Sync {
    /// Returns the name of the repository (for logs).
    fn name(&self) -> &str;

    /// Look up a character. Absent characters yield a fallback record.
    async fn lookup(&self, character: char) -> CharacterRecord;
}

#[derive(Debug)]
pub enum DictionaryError {
    Io(std::io::Error),
    Parse(serde_json::Error),
}

impl fmt::Display for DictionaryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DictionaryError::Io(e) => write!(f, "dictionary I/O error: {e}"),
            DictionaryError::Parse(e) => write!(f, "dictionary parse error: {e}"),
        }
    }
}

impl std::error::Error for DictionaryError {}

/// The record returned for characters missing from the table.
pub fn fallback_record(character: char) -> CharacterRecord {
    CharacterRecord::new(
        character,
        UNKNOWN_PINYIN,
        "Definition not found in offline database.",
        "Try characters like: 爱, 中, 文, 学, 你, 我, 水...",
        "Data is limited in offline mode.",
    )
}

fn builtin_records() -> Vec<CharacterRecord> {
    vec![
        CharacterRecord::new('爱', "ài", "Love; affection; to be fond of; to like.", "我爱你。", "I love you."),
        CharacterRecord::new('中', "zhōng", "Center; middle; inside; China.", "我正在学习中文。", "I am learning Chinese."),
        CharacterRecord::new('文', "wén", "Language; culture; writing; literature.", "中国有着悠久的文化。", "China has a long history of culture."),
        CharacterRecord::new('学', "xué", "To learn; to study; school; science.", "好好学习，天天向上。", "Study hard and make progress every day."),
        CharacterRecord::new('习', "xí", "To practice; to study; habit.", "练习使人完美。", "Practice makes perfect."),
        CharacterRecord::new('好', "hǎo", "Good; well; proper; good to.", "你好吗？", "How are you?"),
        CharacterRecord::new('你', "nǐ", "You (second person singular).", "很高兴认识你。", "Nice to meet you."),
        CharacterRecord::new('我', "wǒ", "I; me; my.", "我是一个学生。", "I am a student."),
        CharacterRecord::new('他', "tā", "He; him.", "他是我的朋友。", "He is my friend."),
        CharacterRecord::new('人', "rén", "Person; people; human being.", "人人为我，我为人人。", "All for one, one for all."),
        CharacterRecord::new('大', "dà", "Big; huge; large; great.", "这个苹果很大。", "This apple is very big."),
        CharacterRecord::new('小', "xiǎo", "Small; little; young.", "那只小猫很可爱。", "That little cat is very cute."),
        CharacterRecord::new('水', "shuǐ", "Water; river; liquid.", "多喝水对身体好。", "Drinking more water is good for your health."),
        CharacterRecord::new('火', "huǒ", "Fire; flame; burn; anger.", "小心火烛。", "Be careful with fire."),
        CharacterRecord::new('谢', "xiè", "To thank; to apologize; to wither.", "谢谢你的帮助。", "Thank you for your help."),
        CharacterRecord::new('家', "jiā", "Family; home; household.", "我想回家。", "I want to go home."),
        CharacterRecord::new('猫', "māo", "Cat.", "我有一只猫。", "I have a cat."),
        CharacterRecord::new('狗', "gǒu", "Dog.", "那只狗在叫。", "That dog is barking."),
    ]
}

/// Offline dictionary backed by an in-memory map.
pub struct LocalDictionary {
    entries: HashMap<char, CharacterRecord>,
    delay: Duration,
}

impl LocalDictionary {
    /// The built-in table with the default lookup delay.
    pub fn new() -> Self {
        Self::with_delay(DEFAULT_LOOKUP_DELAY)
    }

    pub fn with_delay(delay: Duration) -> Self {
        let entries = builtin_records()
            .into_iter()
            .map(|record| (record.character, record))
            .collect();
        Self { entries, delay }
    }

    /// Merge records over the current table. Returns how many were added or replaced.
    pub fn extend(&mut self, records: Vec<CharacterRecord>) -> usize {
        let count = records.len();
        for record in records {
            self.entries.insert(record.character, record);
        }
        count
    }

    /// Merge records from a JSON file containing an array of records.
    pub fn load_entries_file(&mut self, path: &Path) -> Result<usize, DictionaryError> {
        let json = fs::read_to_string(path).map_err(DictionaryError::Io)?;
        let records: Vec<CharacterRecord> =
            serde_json::from_str(&json).map_err(DictionaryError::Parse)?;
        let count = self.extend(records);
        info!("Loaded {} dictionary entries from {}", count, path.display());
        Ok(count)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Synchronous lookup without the artificial delay.
    pub fn get(&self, character: char) -> CharacterRecord {
        self.entries
            .get(&character)
            .cloned()
            .unwrap_or_else(|| fallback_record(character))
    }
}

impl Default for LocalDictionary {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CharacterRepository for LocalDictionary {
    fn name(&self) -> &str {
        "local"
    }

    async fn lookup(&self, character: char) -> CharacterRecord {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        let record = self.get(character);
        debug!("Lookup {} -> {}", character, record.pinyin);
        record
    }
}
