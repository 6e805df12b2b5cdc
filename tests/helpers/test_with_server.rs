#[macro_export]
macro_rules! test_with_server {
    ($name:ident, |$server:ident, $ctx_state:ident| $body:block) => {
        #[tokio::test(flavor = "multi_thread")]
        #[serial_test::serial]
        async fn $name() {
            use microgigs_server::middleware::mw_ctx::SimulatedLatency;

            let $ctx_state = $crate::helpers::test_ctx_state(SimulatedLatency::none());
            let $server = $crate::helpers::another_client(&$ctx_state);

            $body
        }
    };
}
