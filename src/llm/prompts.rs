//! Fixed prompt templates for the external text-generation collaborator.
//!
//! The engine never talks to a model directly; it hands one of these
//! instruction blocks (plus its payload) to a [`TextGenerator`] and parses
//! the JSON that comes back. Template wording is part of the contract with
//! the response parsers.
//!
//! [`TextGenerator`]: crate::llm::TextGenerator

/// Structured morpheme-analysis instruction. The word list is appended,
/// one word per line.
pub const ANALYSIS_PROMPT: &str = r#"You are a morphological analysis specialist.

Analyze the following words and provide their morpheme breakdown.

For each word, identify:
1. The ROOT morpheme (the core meaning-carrying part)
2. Any PREFIXES
3. Any SUFFIXES
4. Syllable breakdown
5. Difficulty score (1-10, where 1=common/easy, 10=rare/challenging)

Return JSON array:
```json
[
  {
    "word": "unpredictable",
    "root": "dict",
    "morphemes": [
      {"text": "un", "type": "prefix", "meaning": "not", "origin": "Germanic"},
      {"text": "pre", "type": "prefix", "meaning": "before", "origin": "Latin"},
      {"text": "dict", "type": "root", "meaning": "say, speak", "origin": "Latin"},
      {"text": "able", "type": "suffix", "meaning": "capable of", "origin": "Latin"}
    ],
    "syllables": ["un", "pre", "dict", "a", "ble"],
    "difficulty": 6
  }
]
```

Words to analyze:
"#;

/// Pronunciation-and-definition instruction for the pre-reading primer.
/// The word list is appended, one word per line.
pub const PRIMER_PROMPT: &str = r#"You are a vocabulary instruction specialist.

Create a brief pronunciation guide and definition for each word below.
Format as JSON array:

```json
[
  {
    "word": "hypothesis",
    "pronunciation": "hy-POTH-eh-sis",
    "definition": "an educated guess or proposed explanation",
    "example": "The scientist's hypothesis was proven correct."
  }
]
```

Guidelines:
- Pronunciation: Use hyphens for syllables, CAPS for stressed syllable
- Definition: Simple, clear, one sentence
- Example: Short sentence using the word naturally

Words to define:
"#;

/// System instruction for enhanced decoder-trap generation with lookalike
/// distractors. The paragraph/question payload is sent as the user message.
pub const TRAP_GENERATOR_PROMPT: &str = r#"You are a reading assessment specialist creating decoder traps for literacy rehabilitation.

Your task: Generate enhanced multiple-choice decoder traps that catch readers who GUESS words instead of DECODING them.

## WHAT MAKES A GOOD TRAP

Three-cueing readers guess words based on:
1. First letter + word length
2. Word shape (ascenders/descenders)
3. Context clues

A good trap includes "lookalike" distractors that:
- Start with the same letter
- Have similar length
- Have similar visual shape
- Would make sense in context (but are WRONG)

## INPUT FORMAT

You will receive paragraphs with target words marked. For each paragraph, generate a trap.

## OUTPUT FORMAT

Return a JSON array of trap objects. Each trap:
```json
{
  "paragraph_index": 0,
  "question": "What did the scientists do about the results?",
  "target_word": "hypothesized",
  "correct_answer": "hypothesized",
  "distractors": [
    {"word": "hospitalized", "is_lookalike": true},
    {"word": "harmonized", "is_lookalike": true},
    {"word": "analyzed", "is_lookalike": false}
  ],
  "explanation": "The word 'hypothesized' means to propose a theory. It starts with 'hypo-' (under/below) not 'hospi-' (guest/host)."
}
```

## LOOKALIKE SELECTION GUIDELINES

For a target word, find lookalikes that share:
- Same first 2-3 letters (hypothesis -> hospitalized)
- Same general shape (tall letters in same positions)
- Similar syllable count
- Same ending pattern when possible (-tion, -ment, -ly, etc.)

Common lookalike pairs:
- predict/protect, through/though/thorough
- hypothesis/hospitalize, beautiful/bountiful
- consecutive/conservative, consider/consumer

Include 2-3 lookalikes and 1 context-plausible non-lookalike per trap.

## IMPORTANT
- Output ONLY valid JSON, no markdown code blocks
- Each paragraph gets exactly one trap
- Questions should require READING the exact word, not guessing from context
"#;
