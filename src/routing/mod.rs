// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod topic_router;

pub use topic_router::TopicRouter;
