/// Characters that end a sentence.
const TERMINATORS: [char; 3] = ['.', '!', '?'];

/// Split a paragraph into sentences.
///
/// The paragraph is trimmed first. Whitespace is Unicode `White_Space` plus
/// the information separators U+001C to U+001F. A sentence boundary is any run of
/// whitespace directly preceded by `.`, `!` or `?`; the terminator stays with
/// the sentence before it and the whitespace is dropped. Empty fragments are
/// discarded, so whitespace-only input yields no sentences.
pub fn split_sentences(paragraph: &str) -> Vec<String> {
    let paragraph = paragraph.trim_matches(is_space);
    let mut sentences = Vec::new();

    let mut start = 0;
    let mut previous: Option<char> = None;
    let mut chars = paragraph.char_indices().peekable();

    while let Some((index, ch)) = chars.next() {
        let after_terminator = previous.is_some_and(|p| TERMINATORS.contains(&p));
        if is_space(ch) && after_terminator {
            push_fragment(&mut sentences, &paragraph[start..index]);

            let mut end = index + ch.len_utf8();
            while let Some(&(next_index, next)) = chars.peek() {
                if !is_space(next) {
                    break;
                }
                end = next_index + next.len_utf8();
                chars.next();
            }
            start = end;
        }
        previous = Some(ch);
    }
    push_fragment(&mut sentences, &paragraph[start..]);

    sentences
}

/// Whitespace as sentence splitting sees it.
pub fn is_space(ch: char) -> bool {
    ch.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&ch)
}

fn push_fragment(sentences: &mut Vec<String>, fragment: &str) {
    if !fragment.is_empty() {
        sentences.push(fragment.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_after_each_terminator() {
        assert_eq!(split_sentences("A. B! C?"), vec!["A.", "B!", "C?"]);
    }

    #[test]
    fn empty_and_blank_input() {
        assert!(split_sentences("").is_empty());
        assert!(split_sentences(" \n\t ").is_empty());
    }

    #[test]
    fn no_punctuation_is_one_trimmed_sentence() {
        assert_eq!(split_sentences("  no punctuation  "), vec!["no punctuation"]);
    }

    #[test]
    fn whitespace_runs_collapse_into_one_boundary() {
        assert_eq!(
            split_sentences("I slept badly.  \n Today feels better!\tMaybe?"),
            vec!["I slept badly.", "Today feels better!", "Maybe?"]
        );
    }

    #[test]
    fn terminators_without_following_space_do_not_split() {
        assert_eq!(
            split_sentences("It costs 3.50 today...really?! Yes."),
            vec!["It costs 3.50 today...really?!", "Yes."]
        );
    }

    #[test]
    fn whitespace_not_after_terminator_is_kept() {
        assert_eq!(
            split_sentences("one two . three"),
            vec!["one two .", "three"]
        );
    }

    #[test]
    fn unicode_whitespace_and_text() {
        assert_eq!(
            split_sentences("Ça va.\u{00a0}Très bien!"),
            vec!["Ça va.", "Très bien!"]
        );
    }

    #[test]
    fn information_separators_count_as_whitespace() {
        assert_eq!(
            split_sentences("\u{1f}First.\u{1c}Second!\u{1e}"),
            vec!["First.", "Second!"]
        );
        assert!(split_sentences("\u{1d}\u{1f}").is_empty());
    }
}
