mod indexer_test;
mod retriever_test;
