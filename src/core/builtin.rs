//! The builtin ML/NLP question bank.

use super::question::{OptionKey, Question};

pub(super) fn questions() -> Vec<Question> {
    use OptionKey::*;

    vec![
        Question::new(
            "Q1. In the Confusion Matrix, what does the value 50 represent?",
            ["Spam → Spam", "Ham → Spam", "Spam → Ham", "Ham → Ham"],
            B,
        ),
        Question::new(
            "Q2. Why is the TF-IDF score of 'the' so low?",
            ["It is very rare", "It appears in almost every document", "It is a spam keyword", "It is punctuation"],
            B,
        ),
        Question::new(
            "Q3. In Bag of Words frequency, which word is most frequent?",
            ["Free", "Offer", "Click", "Win"],
            D,
        ),
        Question::new(
            "Q4. Why do bigrams like 'win prize' help?",
            ["They reduce dataset size", "They capture context", "They remove stop words", "They improve speed"],
            B,
        ),
        Question::new(
            "Q5. Ensemble Voting: if two models predict Spam and one predicts Ham, what will the ensemble predict?",
            ["Ham", "Spam", "Random", "None"],
            B,
        ),
        Question::new(
            "Q6. What issue does the pie chart showing 4825 Ham vs 747 Spam indicate?",
            ["Overfitting", "Class imbalance", "Underfitting", "Noise"],
            B,
        ),
        Question::new(
            "Q7. Model Accuracy: LR=0.96, NB=0.94, RF=0.95. Which model is best?",
            ["LR", "NB", "RF", "All equal"],
            A,
        ),
        Question::new(
            "Q8. Why is precision important in spam detection?",
            ["To avoid false positives", "To reduce training time", "To balance dataset", "To improve accuracy"],
            A,
        ),
        Question::new(
            "Q9. What does the ROC curve show?",
            ["Dataset size", "Trade-off between TPR & FPR", "Accuracy", "Feature importance"],
            B,
        ),
        Question::new(
            "Q10. What problem is shown when training accuracy increases but validation accuracy drops?",
            ["Overfitting", "Underfitting", "Class imbalance", "Noise"],
            A,
        ),
        Question::new(
            "Q11. Random Forest Feature Importance shows highest importance for which word?",
            ["Offer", "Free", "Win", "Click"],
            B,
        ),
        Question::new(
            "Q12. Why use cross-validation?",
            ["Faster training", "Reliable performance estimate", "Remove stop words", "Reduce noise"],
            B,
        ),
        Question::new(
            "Q13. Hyperparameter Tuning: Which C value gives best accuracy (0.01,0.1,1,10)?",
            ["0.01", "0.1", "1", "10"],
            C,
        ),
        Question::new(
            "Q14. In the ML Pipeline, which step converts text into numeric features?",
            ["Text", "TF-IDF", "Model", "Prediction"],
            B,
        ),
        Question::new(
            "Q15. In deep learning loss curves, what does decreasing validation loss mean?",
            ["Overfitting", "Learning is improving", "Noise", "Imbalance"],
            B,
        ),
        Question::new(
            "Q16. Why do 'free' and 'prize' connect in transformer attention?",
            ["Stop words", "Context relevance", "Random edges", "Same length"],
            B,
        ),
        Question::new(
            "Q17. In BERT tokenization, what does '##' mean?",
            ["Start of sentence", "Subword continuation", "End of word", "Stop word"],
            B,
        ),
        Question::new(
            "Q18. Why is GPU faster than CPU for training?",
            ["More RAM", "Parallel matrix computation", "Smaller model", "Less data"],
            B,
        ),
        Question::new(
            "Q19. What is the trade-off between ML and Deep Learning?",
            ["ML is slower but better", "DL is simpler", "ML is faster, DL more powerful", "Both same"],
            C,
        ),
        Question::new(
            "Q20. In deployment pipeline, which step involves stop word removal?",
            ["User Input", "Preprocessing", "Model", "Output"],
            B,
        ),
    ]
}
