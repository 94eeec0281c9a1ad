/// English stop words removed before TF-IDF feature extraction.
pub const ENGLISH_STOP_WORDS: &[&str] = &[
    "a", "about", "above", "across", "after", "afterwards", "again", "against", "all",
    "almost", "alone", "along", "already", "also", "although", "always", "am", "among",
    "amongst", "an", "and", "another", "any", "anyhow", "anyone", "anything", "anyway",
    "anywhere", "are", "around", "as", "at", "back", "be", "became", "because", "become",
    "becomes", "becoming", "been", "before", "beforehand", "behind", "being", "below",
    "beside", "besides", "between", "beyond", "both", "but", "by", "can", "cannot", "could",
    "did", "do", "does", "done", "down", "due", "during", "each", "eg", "either", "else",
    "elsewhere", "enough", "etc", "even", "ever", "every", "everyone", "everything",
    "everywhere", "except", "few", "for", "former", "formerly", "from", "further", "get",
    "give", "go", "had", "has", "have", "he", "hence", "her", "here", "hereafter", "hereby",
    "herein", "hers", "herself", "him", "himself", "his", "how", "however", "i", "ie", "if",
    "in", "inc", "indeed", "into", "is", "it", "its", "itself", "just", "last", "latter",
    "least", "less", "ltd", "many", "may", "me", "meanwhile", "might", "mine", "more",
    "moreover", "most", "mostly", "much", "must", "my", "myself", "namely", "neither",
    "never", "nevertheless", "next", "no", "nobody", "none", "nor", "not", "nothing", "now",
    "nowhere", "of", "off", "often", "on", "once", "one", "only", "onto", "or", "other",
    "others", "otherwise", "our", "ours", "ourselves", "out", "over", "own", "per",
    "perhaps", "please", "rather", "re", "same", "see", "seem", "seemed", "seeming",
    "seems", "several", "she", "should", "since", "so", "some", "somehow", "someone",
    "something", "sometime", "sometimes", "somewhere", "still", "such", "than", "that",
    "the", "their", "them", "themselves", "then", "thence", "there", "thereafter",
    "thereby", "therefore", "therein", "thereupon", "these", "they", "this", "those",
    "though", "through", "throughout", "thru", "thus", "to", "together", "too", "toward",
    "towards", "under", "until", "up", "upon", "us", "very", "via", "was", "we", "well",
    "were", "what", "whatever", "when", "whence", "whenever", "where", "whereafter",
    "whereas", "whereby", "wherein", "whereupon", "wherever", "whether", "which", "while",
    "whither", "who", "whoever", "whole", "whom", "whose", "why", "will", "with", "within",
    "without", "would", "yet", "you", "your", "yours", "yourself", "yourselves",
];

pub fn is_stop_word(token: &str) -> bool {
    ENGLISH_STOP_WORDS.binary_search(&token).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_is_sorted_for_binary_search() {
        assert!(ENGLISH_STOP_WORDS.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_common_words_are_stop_words() {
        assert!(is_stop_word("the"));
        assert!(is_stop_word("with"));
        assert!(!is_stop_word("python"));
    }
}
