use backend_client::{error_from_response, StoreError, TracedClient};
use rand::seq::SliceRandom;
use serde::Deserialize;
use tracing::instrument;
use url::Url;

use crate::model::{decode_entities, Category, Difficulty, Question};

/// Questions fetched per round.
pub const ROUND_SIZE: u32 = 10;

/// Client for the public trivia service.
#[derive(Clone)]
pub struct TriviaClient {
    http: TracedClient,
    endpoint: Url,
}

#[derive(Deserialize)]
struct TriviaResponse {
    response_code: u32,
    results: Vec<RawQuestion>,
}

#[derive(Deserialize)]
struct RawQuestion {
    question: String,
    correct_answer: String,
    incorrect_answers: Vec<String>,
}

impl TriviaClient {
    pub fn new(http: TracedClient, endpoint: &str) -> Result<Self, StoreError> {
        let endpoint = Url::parse(endpoint)
            .map_err(|e| StoreError::validation(format!("Invalid trivia endpoint: {e}")))?;
        Ok(Self { http, endpoint })
    }

    /// Fetch a ten-question multiple-choice round. Answer order is a
    /// uniform random permutation (Fisher-Yates).
    #[instrument(name = "quiz.fetch_round", skip(self), fields(category = category.id(), difficulty = difficulty.as_str()))]
    pub async fn fetch_round(
        &self,
        category: Category,
        difficulty: Difficulty,
    ) -> Result<Vec<Question>, StoreError> {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("amount", &ROUND_SIZE.to_string())
            .append_pair("type", "multiple")
            .append_pair("category", &category.id().to_string())
            .append_pair("difficulty", difficulty.as_str());

        let req = self.http.request(reqwest::Method::GET, url).build()?;
        let resp = self.http.execute(req).await?;

        if !resp.status().is_success() {
            return Err(error_from_response(resp).await);
        }
        let body: TriviaResponse = resp.json().await?;
        if body.response_code != 0 {
            return Err(StoreError::remote(
                200,
                format!("Trivia service returned code {}", body.response_code),
            ));
        }

        let mut rng = rand::rng();
        Ok(body
            .results
            .into_iter()
            .map(|raw| {
                let correct = decode_entities(&raw.correct_answer);
                let mut answers: Vec<String> = raw
                    .incorrect_answers
                    .iter()
                    .map(|a| decode_entities(a))
                    .collect();
                answers.push(correct.clone());
                answers.shuffle(&mut rng);
                Question {
                    text: decode_entities(&raw.question),
                    correct,
                    answers,
                }
            })
            .collect())
    }
}
