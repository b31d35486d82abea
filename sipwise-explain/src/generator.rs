//! Assembly of the per-recommendation explanation.

use std::collections::BTreeSet;

use sipwise_core::{
    Drink, Explanation, FeedbackStore, InteractionStore, PreferenceStore, QuizStore,
    StrategyLabel, UserId, UserSignals,
};

use crate::{ExplanationError, reasons};

/// Number of other users consulted for the collaborative reasons.
pub const COLLABORATIVE_PEERS: usize = 5;

/// Builds one to three reasons for why a drink suits a user.
///
/// Reasons are gathered in a fixed order: preference match (for the
/// `content` and `hybrid` labels), collaborative signal (for the
/// `collaborative` and `hybrid` labels), general compatibility, feedback
/// history, quiz alignment and finally a confidence phrase graded by the
/// score. The list is deduplicated keeping first occurrences and cut to
/// three, so late families only surface when early ones are sparse.
///
/// # Examples
/// ```
/// use sipwise_core::{
///     Drink, DrinkId, PriceTier, StrategyLabel, UserId, test_support::MemoryStore,
/// };
/// use sipwise_explain::ExplanationGenerator;
///
/// let store = MemoryStore::default();
/// let water = Drink::new(DrinkId(1), "Still Water", "water", PriceTier::Budget);
/// let explanation =
///     ExplanationGenerator::new(&store).explain(UserId(1), &water, 0.5, StrategyLabel::Hybrid);
/// assert_eq!(
///     explanation.reasons(),
///     ["Low-calorie option", "Caffeine-free choice", "Non-alcoholic and safe for all ages"]
/// );
/// ```
#[derive(Debug)]
pub struct ExplanationGenerator<'a, S: ?Sized> {
    store: &'a S,
}

impl<'a, S> ExplanationGenerator<'a, S>
where
    S: PreferenceStore + InteractionStore + FeedbackStore + QuizStore + ?Sized,
{
    /// Construct a generator reading from `store`.
    #[must_use]
    pub const fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Explain `drink` for `user`, reading every signal from the store.
    ///
    /// Never fails: any read error is logged and the fallback explanation
    /// is returned instead.
    #[must_use]
    pub fn explain(
        &self,
        user: UserId,
        drink: &Drink,
        score: f32,
        label: StrategyLabel,
    ) -> Explanation {
        self.try_explain(user, drink, score, label)
            .unwrap_or_else(|err| fallback(user, drink, &err))
    }

    /// Explain `drink` using signals the caller already loaded.
    ///
    /// Collaborative peers and quiz answers are still read from the store.
    #[must_use]
    pub fn explain_with(
        &self,
        signals: &UserSignals,
        drink: &Drink,
        score: f32,
        label: StrategyLabel,
    ) -> Explanation {
        self.try_explain_with(signals, drink, score, label)
            .unwrap_or_else(|err| fallback(signals.user, drink, &err))
    }

    /// Fallible form of [`Self::explain`].
    ///
    /// # Errors
    /// Returns [`ExplanationError::Store`] when any collaborator read fails.
    pub fn try_explain(
        &self,
        user: UserId,
        drink: &Drink,
        score: f32,
        label: StrategyLabel,
    ) -> Result<Explanation, ExplanationError> {
        let signals = self.load_signals(user)?;
        self.try_explain_with(&signals, drink, score, label)
    }

    /// Fallible form of [`Self::explain_with`].
    ///
    /// # Errors
    /// Returns [`ExplanationError::Store`] when the peer or quiz read fails.
    pub fn try_explain_with(
        &self,
        signals: &UserSignals,
        drink: &Drink,
        score: f32,
        label: StrategyLabel,
    ) -> Result<Explanation, ExplanationError> {
        let mut collected = Vec::new();
        if label.includes_content() {
            reasons::preference_match(drink, signals.profile.as_ref(), signals, &mut collected);
        }
        if label.includes_collaborative() {
            let peers = self.store.favorited_by_others(
                &BTreeSet::from([drink.id]),
                signals.user,
                COLLABORATIVE_PEERS,
            )?;
            reasons::collaborative_signal(!peers.is_empty(), &mut collected);
        }
        reasons::general_compatibility(drink, signals.filter.as_ref(), &mut collected);
        reasons::feedback_history(drink, signals, &mut collected);
        let answers = self.store.quiz_answers(signals.user)?;
        reasons::quiz_alignment(drink, &answers, &mut collected);
        collected.push(reasons::confidence(score).to_owned());
        Ok(Explanation::from_reasons(collected))
    }

    fn load_signals(&self, user: UserId) -> Result<UserSignals, ExplanationError> {
        let mut signals = UserSignals::empty(user)
            .with_interactions(self.store.interactions(user)?)
            .with_feedback(self.store.feedback(user)?);
        signals.profile = self.store.profile(user)?;
        signals.filter = self.store.active_filter(user)?;
        Ok(signals)
    }
}

fn fallback(user: UserId, drink: &Drink, err: &ExplanationError) -> Explanation {
    log::error!("explaining {} for {user} failed: {err}", drink.id);
    Explanation::fallback()
}
