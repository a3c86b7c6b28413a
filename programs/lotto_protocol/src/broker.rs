use anchor_lang::prelude::*;

use crate::constants::MAX_TRACKED_REQUESTS;
use crate::errors::LottoError;
use crate::state::{RandomnessBroker, RandomnessRequest};
use crate::utils::request_seed;

impl RandomnessBroker {
    /// Opens a new request for `round_id`. A round may only have one unfulfilled request.
    pub fn request(&mut self, round_id: u64, now: i64) -> Result<RandomnessRequest> {
        require!(
            !self
                .requests
                .iter()
                .any(|r| r.round_id == round_id && !r.fulfilled),
            LottoError::DuplicateRequest
        );

        // make room by dropping the oldest settled request
        if self.requests.len() >= MAX_TRACKED_REQUESTS {
            let settled = self
                .requests
                .iter()
                .position(|r| r.fulfilled)
                .ok_or(LottoError::BrokerFull)?;
            self.requests.remove(settled);
        }

        let request_id = self.next_request_id;
        let request = RandomnessRequest {
            request_id,
            round_id,
            seed: request_seed(round_id, request_id, now),
            requested_at: now,
            fulfilled: false,
        };

        self.next_request_id = request_id
            .checked_add(1)
            .ok_or(LottoError::MathOverflow)?;
        self.requests.push(request);

        Ok(request)
    }

    /// The outstanding request with this id. Unknown and already fulfilled ids are rejected alike.
    pub fn outstanding(&self, request_id: u64) -> Result<RandomnessRequest> {
        self.requests
            .iter()
            .find(|r| r.request_id == request_id && !r.fulfilled)
            .copied()
            .ok_or_else(|| error!(LottoError::UnknownRequest))
    }

    /// One-shot: a second call for the same id fails with `UnknownRequest`.
    pub fn mark_fulfilled(&mut self, request_id: u64) -> Result<RandomnessRequest> {
        let request = self
            .requests
            .iter_mut()
            .find(|r| r.request_id == request_id && !r.fulfilled)
            .ok_or(LottoError::UnknownRequest)?;

        request.fulfilled = true;
        let settled = *request;

        self.fulfilled_count = self
            .fulfilled_count
            .checked_add(1)
            .ok_or(LottoError::MathOverflow)?;

        Ok(settled)
    }

    /// Forgets an outstanding request; a late fulfillment for it is then unknown.
    pub fn cancel(&mut self, request_id: u64) -> Result<RandomnessRequest> {
        let idx = self
            .requests
            .iter()
            .position(|r| r.request_id == request_id && !r.fulfilled)
            .ok_or(LottoError::UnknownRequest)?;

        Ok(self.requests.remove(idx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::INITIAL_REQUEST_ID;

    fn broker() -> RandomnessBroker {
        RandomnessBroker {
            bump: 255,
            next_request_id: INITIAL_REQUEST_ID,
            requests: Vec::new(),
            fulfilled_count: 0,
            version: 1,
        }
    }

    #[test]
    fn issues_monotonic_ids() {
        let mut b = broker();
        let first = b.request(1, 100).unwrap();
        b.mark_fulfilled(first.request_id).unwrap();
        let second = b.request(1, 200).unwrap();

        assert_eq!(first.request_id, INITIAL_REQUEST_ID);
        assert_eq!(second.request_id, INITIAL_REQUEST_ID + 1);
        assert_eq!(second.round_id, 1);
        assert_eq!(second.requested_at, 200);
        assert_ne!(first.seed, second.seed);
    }

    #[test]
    fn rejects_second_outstanding_request_for_round() {
        let mut b = broker();
        b.request(7, 100).unwrap();

        let err = b.request(7, 101).unwrap_err();
        assert_eq!(err, error!(LottoError::DuplicateRequest));
        assert_eq!(b.requests.len(), 1);
        assert_eq!(b.next_request_id, INITIAL_REQUEST_ID + 1);

        // other rounds are unaffected
        assert!(b.request(8, 102).is_ok());
    }

    #[test]
    fn fulfills_at_most_once() {
        let mut b = broker();
        let req = b.request(1, 100).unwrap();

        assert_eq!(b.outstanding(req.request_id).unwrap(), req);
        let settled = b.mark_fulfilled(req.request_id).unwrap();
        assert!(settled.fulfilled);
        assert_eq!(b.fulfilled_count, 1);

        assert_eq!(
            b.outstanding(req.request_id).unwrap_err(),
            error!(LottoError::UnknownRequest)
        );
        assert_eq!(
            b.mark_fulfilled(req.request_id).unwrap_err(),
            error!(LottoError::UnknownRequest)
        );
        assert_eq!(b.fulfilled_count, 1);
    }

    #[test]
    fn unknown_ids_are_rejected() {
        let mut b = broker();
        b.request(1, 100).unwrap();

        assert_eq!(b.outstanding(999).unwrap_err(), error!(LottoError::UnknownRequest));
        assert_eq!(b.mark_fulfilled(999).unwrap_err(), error!(LottoError::UnknownRequest));
        assert_eq!(b.cancel(999).unwrap_err(), error!(LottoError::UnknownRequest));
    }

    #[test]
    fn cancelled_request_is_forgotten() {
        let mut b = broker();
        let req = b.request(1, 100).unwrap();

        b.cancel(req.request_id).unwrap();
        assert!(b.requests.is_empty());
        assert_eq!(
            b.mark_fulfilled(req.request_id).unwrap_err(),
            error!(LottoError::UnknownRequest)
        );

        // round may ask again with a fresh id
        let retry = b.request(1, 5_000).unwrap();
        assert_eq!(retry.request_id, req.request_id + 1);
    }

    #[test]
    fn evicts_oldest_settled_request_when_full() {
        let mut b = broker();
        for round_id in 0..MAX_TRACKED_REQUESTS as u64 {
            let req = b.request(round_id, 0).unwrap();
            b.mark_fulfilled(req.request_id).unwrap();
        }
        assert_eq!(b.requests.len(), MAX_TRACKED_REQUESTS);

        let fresh = b.request(100, 1).unwrap();
        assert_eq!(b.requests.len(), MAX_TRACKED_REQUESTS);
        assert_eq!(b.requests[0].request_id, INITIAL_REQUEST_ID + 1);
        assert_eq!(b.requests.last().copied(), Some(fresh));
    }

    #[test]
    fn full_of_outstanding_requests_is_an_error() {
        let mut b = broker();
        for round_id in 0..MAX_TRACKED_REQUESTS as u64 {
            b.request(round_id, 0).unwrap();
        }
        assert_eq!(b.request(100, 1).unwrap_err(), error!(LottoError::BrokerFull));
    }
}
