//! # Integration Flows
//!
//! The full node (real RPC client, signer, contract writer, event index,
//! minting service and HTTP router) against [`FakeChain`]. Only the prover
//! is replaced: it derives the fingerprint from the circuit input with
//! keccak so equal ideas collide and different ideas do not.
//!
//! ## Flows Tested
//!
//! 1. **Mint → Index**: a confirmed mint is visible to the duplicate guard
//!    and the recency list without restarting
//! 2. **Duplicate Guard**: a repeated idea is refused before anything is sent
//! 3. **Recency List**: newest block first, ordinary transfers excluded
//! 4. **Cache Lifecycle**: one scan per event kind until a mint invalidates
//! 5. **Failure Paths**: reverted mints leave the cached index in place
//! 6. **Document → Idea → Mint**: an uploaded document is condensed by the
//!    HTTP summarizer adapter and the returned idea mints like any other

#[cfg(test)]
mod tests {
    use crate::integration::fake_chain::FakeChain;
    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request, StatusCode};
    use axum::routing::post;
    use axum::{Json, Router};
    use node_runtime::{NodeConfig, NodeContainer};
    use pn_01_event_index::Fingerprint;
    use pn_02_idea_minting::{CircuitInput, ProofCalldata, ProofError, ProofGenerator};
    use serde_json::{json, Value};
    use sha3::{Digest, Keccak256};
    use shared_types::{Address, U256};
    use std::collections::HashMap;
    use std::sync::Arc;
    use tower::ServiceExt;

    // =========================================================================
    // TEST FIXTURES
    // =========================================================================

    /// Hardhat account #0.
    const MINTER_KEY: &str = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
    const OWNER: &str = "0x70997970c51812dc3a010c7d01b50e0d17dc79c8";

    fn contract() -> Address {
        Address::repeat_byte(0xc0)
    }

    struct KeccakProver;

    impl KeccakProver {
        fn fingerprint_of(input: &CircuitInput) -> Fingerprint {
            let digest = Keccak256::digest(&input.preimage);
            Fingerprint::new(
                U256::from_be_slice(&digest[..16]),
                U256::from_be_slice(&digest[16..]),
            )
        }
    }

    #[async_trait]
    impl ProofGenerator for KeccakProver {
        async fn prove(&self, input: &CircuitInput) -> Result<ProofCalldata, ProofError> {
            let one = U256::from(1u64);
            Ok(ProofCalldata {
                a: [one, one],
                b: [[one, one], [one, one]],
                c: [one, one],
                input: *Self::fingerprint_of(input).words(),
            })
        }
    }

    struct Node {
        chain: Arc<FakeChain>,
        router: Router,
    }

    /// Start the node against `chain`, scanning from `genesis`.
    async fn start_node(chain: Arc<FakeChain>, genesis: u64) -> Node {
        start_node_with(chain, genesis, Vec::new()).await
    }

    async fn start_node_with(
        chain: Arc<FakeChain>,
        genesis: u64,
        extra: Vec<(&'static str, String)>,
    ) -> Node {
        let url = chain.spawn().await;
        let mut vars: HashMap<&str, String> = HashMap::from([
            ("PN_RPC_URL", url),
            ("PN_CONTRACT_ADDRESS", format!("{:?}", contract())),
            ("PN_MINTER_PRIVATE_KEY", MINTER_KEY.to_string()),
            ("PN_GENESIS_BLOCK", genesis.to_string()),
            ("PN_RECEIPT_POLL_MS", "10".to_string()),
            ("PN_CONFIRMATION_TIMEOUT_SECS", "5".to_string()),
        ]);
        vars.extend(extra);
        let config = NodeConfig::from_lookup(|key| vars.get(key).cloned()).unwrap();
        let container = NodeContainer::connect_with_prover(config, Arc::new(KeccakProver))
            .await
            .unwrap();
        let router = container.gateway().unwrap().router();
        Node { chain, router }
    }

    async fn fresh_node() -> Node {
        start_node(Arc::new(FakeChain::new(contract())), 0).await
    }

    impl Node {
        async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
            let response = self.router.clone().oneshot(request).await.unwrap();
            let status = response.status();
            let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
            (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
        }

        async fn get(&self, uri: &str) -> (StatusCode, Value) {
            self.send(Request::builder().uri(uri).body(Body::empty()).unwrap())
                .await
        }

        async fn mint(&self, idea: &str) -> (StatusCode, Value) {
            let body = json!({ "owner": OWNER, "idea": idea });
            self.send(
                Request::builder()
                    .method(Method::POST)
                    .uri("/api/mint")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
        }

        async fn token_ids(&self, query: &str) -> Vec<String> {
            let (status, body) = self.get(&format!("/api/mint-logs{}", query)).await;
            assert_eq!(status, StatusCode::OK);
            body["patents"]
                .as_array()
                .unwrap()
                .iter()
                .map(|p| p["tokenId"].as_str().unwrap().to_string())
                .collect()
        }
    }

    fn exists_uri(fingerprint: &Value) -> String {
        format!(
            "/api/ideas/exists?a={}&b={}",
            fingerprint[0].as_str().unwrap(),
            fingerprint[1].as_str().unwrap()
        )
    }

    // =========================================================================
    // FLOW 1: MINT → INDEX
    // =========================================================================

    #[tokio::test]
    async fn test_minted_idea_is_indexed() {
        let node = fresh_node().await;

        let (status, body) = node.mint("a kettle that boils with sunlight").await;
        assert_eq!(status, StatusCode::OK, "{}", body);
        assert_eq!(body["success"], true);
        assert_eq!(body["tokenId"], "1");

        let (_, exists) = node.get(&exists_uri(&body["fingerprint"])).await;
        assert_eq!(exists["exists"], true);

        assert_eq!(node.token_ids("").await, vec!["1"]);

        let (status, stored) = node.get("/api/patents/1/fingerprint").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(stored["fingerprint"], body["fingerprint"]);
    }

    #[tokio::test]
    async fn test_fingerprint_notation_does_not_matter() {
        let node = fresh_node().await;
        let (_, body) = node.mint("folding bicycle helmet").await;

        let words: Vec<U256> = body["fingerprint"]
            .as_array()
            .unwrap()
            .iter()
            .map(|w| U256::parse(w.as_str().unwrap()).unwrap())
            .collect();
        let uri = format!(
            "/api/ideas/exists?a=0x{:x}&b=00{}",
            words[0],
            words[1].to_dec_string()
        );

        let (status, exists) = node.get(&uri).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(exists["exists"], true);
    }

    // =========================================================================
    // FLOW 2: DUPLICATE GUARD
    // =========================================================================

    #[tokio::test]
    async fn test_duplicate_idea_is_refused_before_submission() {
        let node = fresh_node().await;

        let (status, _) = node.mint("umbrella with a gutter").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(node.chain.sent_transactions(), 1);

        let (status, body) = node.mint("umbrella with a gutter").await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["success"], false);
        assert_eq!(node.chain.sent_transactions(), 1);

        let (status, _) = node.mint("umbrella with two gutters").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(node.chain.sent_transactions(), 2);
    }

    #[tokio::test]
    async fn test_idea_registered_before_startup_is_duplicate() {
        let chain = Arc::new(FakeChain::new(contract()));
        let input = pn_02_idea_minting::prepare_circuit_input("pre-existing idea").unwrap();
        chain.seed_mint(Address::repeat_byte(7), KeccakProver::fingerprint_of(&input));

        let node = start_node(chain, 0).await;
        let (status, _) = node.mint("pre-existing idea").await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(node.chain.sent_transactions(), 0);
    }

    // =========================================================================
    // FLOW 3: RECENCY LIST
    // =========================================================================

    #[tokio::test]
    async fn test_history_is_newest_first() {
        let chain = Arc::new(FakeChain::new(contract()));
        for i in 1..=3u64 {
            chain.advance_blocks(10);
            chain.seed_mint(
                Address::repeat_byte(i as u8),
                Fingerprint::new(U256::from(i), U256::from(i)),
            );
        }
        chain.seed_transfer(Address::repeat_byte(1), Address::repeat_byte(9), U256::from(1u64));

        let node = start_node(chain, 0).await;
        assert_eq!(node.token_ids("").await, vec!["3", "2", "1"]);
        assert_eq!(node.token_ids("?limit=2").await, vec!["3", "2"]);
        assert_eq!(node.token_ids("?limit=0").await.len(), 3);
        assert_eq!(node.token_ids("?limit=many").await.len(), 3);
    }

    #[tokio::test]
    async fn test_genesis_block_bounds_the_scan() {
        let chain = Arc::new(FakeChain::new(contract()));
        chain.seed_mint(Address::repeat_byte(1), Fingerprint::new(U256::from(5u64), U256::from(6u64)));
        chain.advance_blocks(10);
        chain.seed_mint(Address::repeat_byte(2), Fingerprint::new(U256::from(7u64), U256::from(8u64)));

        let node = start_node(chain, 5).await;
        assert_eq!(node.token_ids("").await, vec!["2"]);

        let (_, body) = node.get("/api/ideas/exists?a=5&b=6").await;
        assert_eq!(body["exists"], false);
        let (_, body) = node.get("/api/ideas/exists?a=7&b=8").await;
        assert_eq!(body["exists"], true);
    }

    // =========================================================================
    // FLOW 4: CACHE LIFECYCLE
    // =========================================================================

    #[tokio::test]
    async fn test_one_scan_per_kind_until_mint() {
        let node = fresh_node().await;

        node.get("/api/ideas/exists?a=1&b=2").await;
        node.get("/api/ideas/exists?a=3&b=4").await;
        assert_eq!(node.chain.get_logs_calls(), 1);

        assert!(node.token_ids("").await.is_empty());
        assert!(node.token_ids("").await.is_empty());
        assert_eq!(node.chain.get_logs_calls(), 2);

        // The duplicate check hits the built index.
        let (status, _) = node.mint("self-stirring pot").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(node.chain.get_logs_calls(), 2);

        assert_eq!(node.token_ids("").await, vec!["1"]);
        assert_eq!(node.chain.get_logs_calls(), 3);

        let (_, stats) = node.get("/api/index/stats").await;
        assert_eq!(stats["index"]["invalidations"], 1);
        assert_eq!(stats["index"]["recency_list"]["state"], "built");
        assert_eq!(stats["index"]["fingerprint_index"]["state"], "unbuilt");
    }

    // =========================================================================
    // FLOW 5: FAILURE PATHS
    // =========================================================================

    #[tokio::test]
    async fn test_reverted_mint_keeps_index() {
        let node = fresh_node().await;
        node.chain.set_revert_all(true);

        let (status, body) = node.mint("perpetual motion").await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert!(body["error"].as_str().unwrap().contains("reverted"));

        let (_, stats) = node.get("/api/index/stats").await;
        assert_eq!(stats["index"]["invalidations"], 0);
        assert_eq!(stats["index"]["fingerprint_index"]["state"], "built");
        assert!(node.token_ids("").await.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_patent_fingerprint() {
        let node = fresh_node().await;
        let (status, _) = node.get("/api/patents/42/fingerprint").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    // =========================================================================
    // FLOW 6: DOCUMENT → IDEA → MINT
    // =========================================================================

    /// Chat completions endpoint answering with the last line of the prompt
    /// uppercased, so the reply depends on the uploaded text.
    async fn spawn_summarizer() -> String {
        let app = Router::new().route(
            "/v1/chat/completions",
            post(|Json(body): Json<Value>| async move {
                let prompt = body["messages"][0]["content"].as_str().unwrap_or_default();
                let last = prompt.lines().last().unwrap_or_default().to_uppercase();
                Json(json!({ "choices": [{ "message": { "content": last } }] }))
            }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}/v1/chat/completions", addr)
    }

    fn document_upload(text: &str) -> Request<Body> {
        let body = format!(
            "--flow\r\n\
             Content-Disposition: form-data; name=\"patent_document\"; filename=\"claim.txt\"\r\n\
             Content-Type: text/plain\r\n\r\n\
             {text}\r\n--flow--\r\n"
        );
        Request::builder()
            .method(Method::POST)
            .uri("/api/submit")
            .header(header::CONTENT_TYPE, "multipart/form-data; boundary=flow")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_uploaded_document_is_summarized_then_minted() {
        let summarizer = spawn_summarizer().await;
        let node = start_node_with(
            Arc::new(FakeChain::new(contract())),
            0,
            vec![
                ("PN_SUMMARIZER_URL", summarizer),
                ("PN_SUMMARIZER_PROMPT", "Condense:\n{document}".to_string()),
            ],
        )
        .await;

        let (status, body) = node
            .send(document_upload("a rake with folding tines"))
            .await;
        assert_eq!(status, StatusCode::OK, "{}", body);
        assert_eq!(body["idea"], "A RAKE WITH FOLDING TINES");

        let idea = body["idea"].as_str().unwrap().to_string();
        let (status, minted) = node.mint(&idea).await;
        assert_eq!(status, StatusCode::OK);

        let (_, exists) = node.get(&exists_uri(&minted["fingerprint"])).await;
        assert_eq!(exists["exists"], true);

        let (status, _) = node.mint(&idea).await;
        assert_eq!(status, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_submit_without_summarizer_is_unavailable() {
        let node = fresh_node().await;
        let (status, body) = node.send(document_upload("anything")).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["success"], false);
    }
}
