use futures::future::join_all;
use std::future::Future;

/// Outcomes of a batch of independent operations, in input order.
#[derive(Debug)]
pub struct Settled<T, E> {
    outcomes: Vec<Result<T, E>>,
}

impl<T, E> Settled<T, E> {
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn values(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_ok()).count()
    }

    pub fn failures(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_err()).count()
    }

    pub fn into_outcomes(self) -> Vec<Result<T, E>> {
        self.outcomes
    }
}

impl<T, E> FromIterator<Result<T, E>> for Settled<T, E> {
    fn from_iter<I: IntoIterator<Item = Result<T, E>>>(iter: I) -> Self {
        Self {
            outcomes: iter.into_iter().collect(),
        }
    }
}

/// Waits for every future to finish, successful or not.
///
/// A failure never cancels or hides its siblings.
pub async fn settle_all<I, F, T, E>(futures: I) -> Settled<T, E>
where
    I: IntoIterator<Item = F>,
    F: Future<Output = Result<T, E>>,
{
    Settled {
        outcomes: join_all(futures).await,
    }
}
