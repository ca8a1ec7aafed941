#[cfg(test)]
mod tests {
    use anchor_lang::prelude::Pubkey;

    use crate::error::HubReaderError;
    use crate::pda::*;
    use crate::ledger::*;
    use crate::operations::*;
    use crate::state::*;
    use crate::test::fixtures::*;

    fn epoch(total_revenue: u64, eligible_supply: u64) -> RevenueEpoch {
        RevenueEpoch {
            property_state: Pubkey::new_unique(),
            epoch_number: 1,
            total_revenue,
            eligible_supply,
            deposit: None,
        }
    }

    fn settled_claim(epoch: Pubkey, amount_claimed: u64) -> ClaimRecord {
        ClaimRecord {
            epoch,
            investor: Pubkey::new_unique(),
            claimed: true,
            amount_claimed,
            claimed_at: CLAIMED_AT,
        }
    }

    #[test]
    fn test_proportional_share() {
        // 125_000 of 250_000 eligible tokens earns half of 0.1 SOL
        let epoch = epoch(100_000_000, 250_000);
        assert_eq!(claimable_amount(&epoch, None, 125_000).unwrap(), 50_000_000);
    }

    #[test]
    fn test_share_rounds_down() {
        let epoch = epoch(100, 3);
        assert_eq!(claimable_amount(&epoch, None, 1).unwrap(), 33);
        assert_eq!(claimable_amount(&epoch, None, 2).unwrap(), 66);
    }

    #[test]
    fn test_claimed_epoch_pays_nothing() {
        let epoch = epoch(100_000_000, 250_000);
        let claim = settled_claim(Pubkey::new_unique(), 50_000_000);

        for balance in [0, 125_000, 250_000, u64::MAX] {
            assert_eq!(claimable_amount(&epoch, Some(&claim), balance).unwrap(), 0);
        }
    }

    #[test]
    fn test_unsettled_claim_record_does_not_block() {
        let epoch = epoch(1_000, 10);
        let claim = ClaimRecord {
            claimed: false,
            ..settled_claim(Pubkey::new_unique(), 0)
        };
        assert_eq!(claimable_amount(&epoch, Some(&claim), 5).unwrap(), 500);
    }

    #[test]
    fn test_zero_eligible_supply_pays_nothing() {
        let epoch = epoch(100_000_000, 0);
        assert_eq!(claimable_amount(&epoch, None, 125_000).unwrap(), 0);
    }

    #[test]
    fn test_no_intermediate_overflow() {
        let epoch = epoch(u64::MAX, u64::MAX);
        assert_eq!(claimable_amount(&epoch, None, u64::MAX).unwrap(), u64::MAX);
    }

    #[test]
    fn test_result_beyond_u64_overflows() {
        let epoch = epoch(u64::MAX, 1);
        assert_eq!(
            claimable_amount(&epoch, None, 2).unwrap_err(),
            HubReaderError::ArithmeticOverflow
        );
    }

    /// The payout uses the current balance against the deposit-time supply.
    /// Tokens acquired after the snapshot still earn a share of the epoch,
    /// which can push the sum of previews past the deposited revenue.
    #[test]
    fn test_current_balance_not_snapshot() {
        let epoch = epoch(1_000, 100);
        let early_holder = claimable_amount(&epoch, None, 100).unwrap();
        let late_buyer = claimable_amount(&epoch, None, 50).unwrap();
        assert_eq!(early_holder, 1_000);
        assert_eq!(late_buyer, 500);
        assert!(early_holder + late_buyer > epoch.total_revenue);
    }

    #[test]
    fn test_claimable_from_accounts() {
        let mut world = PropertyWorld::new();
        let wallet = Pubkey::new_unique();
        let epoch_address = world.add_epoch(1, 100_000_000, 250_000);
        let program = world.config.hub_program_id;

        let epoch_account = world.accounts.get_account(&epoch_address).unwrap().unwrap();
        assert_eq!(
            claimable_from_accounts(&program, &epoch_account, None, 125_000).unwrap(),
            50_000_000
        );

        let claim_address = world.add_claim(&epoch_address, &wallet, 50_000_000);
        let claim_account = world.accounts.get_account(&claim_address).unwrap().unwrap();
        assert_eq!(
            claimable_from_accounts(&program, &epoch_account, Some(&claim_account), 125_000)
                .unwrap(),
            0
        );

        let short = LedgerAccount::new(program, vec![0u8; 10]);
        assert!(matches!(
            claimable_from_accounts(&program, &short, None, 125_000),
            Err(HubReaderError::TooSmall { .. })
        ));
    }

    #[test]
    fn test_preview_before_and_after_claim() {
        let mut world = PropertyWorld::new();
        let wallet = Pubkey::new_unique();
        let epoch_address = world.add_epoch(1, 100_000_000, 250_000);
        world.set_balance(&wallet, 125_000);

        let before =
            preview_claimable(&world.accounts, &world.config, &epoch_address, &wallet).unwrap();
        assert_eq!(before, 50_000_000);

        world.add_claim(&epoch_address, &wallet, before);
        let after =
            preview_claimable(&world.accounts, &world.config, &epoch_address, &wallet).unwrap();
        assert_eq!(after, 0);
    }

    #[test]
    fn test_preview_without_token_account() {
        let mut world = PropertyWorld::new();
        let epoch_address = world.add_epoch(1, 100_000_000, 250_000);
        let wallet = Pubkey::new_unique();
        assert_eq!(
            preview_claimable(&world.accounts, &world.config, &epoch_address, &wallet).unwrap(),
            0
        );
    }

    #[test]
    fn test_preview_missing_epoch() {
        let world = PropertyWorld::new();
        let missing = Pubkey::new_unique();
        assert!(matches!(
            preview_claimable(&world.accounts, &world.config, &missing, &Pubkey::new_unique()),
            Err(HubReaderError::NotFound {
                kind: RecordKind::RevenueEpoch,
                ..
            })
        ));
    }

    #[test]
    fn test_scan_stops_at_first_gap() {
        let mut world = PropertyWorld::new();
        world.add_epoch(1, 100, 10);
        world.add_epoch(2, 200, 10);
        // Epoch 4 is unreachable behind the missing epoch 3
        world.add_epoch(4, 400, 10);

        let scanner = EpochScanner::from_config(&world.config);
        let epochs = scanner.scan(&world.accounts, &world.property_state).unwrap();
        let numbers: Vec<u64> = epochs.iter().map(|e| e.epoch.epoch_number).collect();
        assert_eq!(numbers, vec![1, 2]);

        let by_mint = scanner.scan_mint(&world.accounts, &world.mint).unwrap();
        assert_eq!(by_mint, epochs);

        let current = scanner.current_epoch(&world.accounts, &world.property_state).unwrap();
        assert_eq!(current.map(|e| e.epoch.epoch_number), Some(2));
    }

    #[test]
    fn test_scan_respects_probe_bound() {
        let mut world = PropertyWorld::new();
        for n in 1..=5 {
            world.add_epoch(n, n * 100, 10);
        }

        let scanner = EpochScanner::new(world.config.hub_program_id, ProbePolicy { max_epochs: 3 });
        let epochs = scanner.scan(&world.accounts, &world.property_state).unwrap();
        assert_eq!(epochs.len(), 3);
    }

    #[test]
    fn test_scan_stops_at_undecodable_epoch() {
        let mut world = PropertyWorld::new();
        world.add_epoch(1, 100, 10);
        let second = world.add_epoch(2, 200, 10);
        let truncated = LedgerAccount::new(world.config.hub_program_id, vec![0u8; 12]);
        world.accounts.insert(second, truncated);

        let scanner = EpochScanner::from_config(&world.config);
        assert_eq!(scanner.scan(&world.accounts, &world.property_state).unwrap().len(), 1);
    }

    #[test]
    fn test_scan_stops_at_mismatched_epoch() {
        let mut world = PropertyWorld::new();
        world.add_epoch(1, 100, 10);
        let program = world.config.hub_program_id;

        // Account at epoch 2's address claiming to be epoch 5
        let (second, _) = find_revenue_epoch_address(&world.property_state, 2, &program);
        let data = epoch_data(&world.property_state, 5, 200, 10);
        world.accounts.insert(second, LedgerAccount::new(program, data));

        let scanner = EpochScanner::from_config(&world.config);
        assert_eq!(scanner.scan(&world.accounts, &world.property_state).unwrap().len(), 1);
        assert!(scanner.find_epoch(&world.accounts, &world.property_state, 2).unwrap().is_none());

        // Right number, wrong property
        let data = epoch_data(&Pubkey::new_unique(), 2, 200, 10);
        world.accounts.insert(second, LedgerAccount::new(program, data));
        assert_eq!(scanner.scan(&world.accounts, &world.property_state).unwrap().len(), 1);
    }

    #[test]
    fn test_scan_empty_property() {
        let world = PropertyWorld::new();
        let scanner = EpochScanner::from_config(&world.config);
        assert!(scanner.scan(&world.accounts, &world.property_state).unwrap().is_empty());
    }

    #[test]
    fn test_unclaimed_over_two_epochs() {
        let epochs = [
            EpochTotals {
                address: Pubkey::new_unique(),
                epoch_number: 1,
                total_revenue: 100,
                total_claimed: 40,
            },
            EpochTotals {
                address: Pubkey::new_unique(),
                epoch_number: 2,
                total_revenue: 200,
                total_claimed: 200,
            },
        ];
        assert_eq!(unclaimed_amount(&epochs).unwrap(), 60);
        assert_eq!(total_distributed(&epochs).unwrap(), 240);
    }

    #[test]
    fn test_totals_aggregate_claim_records() {
        let mut world = PropertyWorld::new();
        world.add_epoch(1, 100, 10);
        world.add_epoch(2, 200, 10);

        let scanner = EpochScanner::from_config(&world.config);
        let epochs = scanner.scan(&world.accounts, &world.property_state).unwrap();

        let mut pending = settled_claim(epochs[0].address, 999);
        pending.claimed = false;
        let claims = vec![
            settled_claim(epochs[0].address, 25),
            settled_claim(epochs[0].address, 15),
            pending,
            settled_claim(epochs[1].address, 200),
            // Belongs to some other property
            settled_claim(Pubkey::new_unique(), 1_000),
        ];

        let totals: Vec<EpochTotals> = epochs
            .iter()
            .map(|scanned| EpochTotals::from_claims(scanned, &claims))
            .collect::<crate::Result<_>>()
            .unwrap();

        assert_eq!(totals[0].total_claimed, 40);
        assert_eq!(totals[1].total_claimed, 200);
        assert_eq!(total_distributed(&totals).unwrap(), 240);
        assert_eq!(unclaimed_amount(&totals).unwrap(), 60);
    }

    #[test]
    fn test_over_claimed_epoch_counts_as_zero_unclaimed() {
        let totals = EpochTotals {
            address: Pubkey::new_unique(),
            epoch_number: 1,
            total_revenue: 100,
            total_claimed: 101,
        };
        assert_eq!(totals.unclaimed(), 0);
    }

    #[test]
    fn test_totals_overflow() {
        let big = |n| EpochTotals {
            address: Pubkey::new_unique(),
            epoch_number: n,
            total_revenue: u64::MAX,
            total_claimed: u64::MAX,
        };
        assert_eq!(
            total_distributed(&[big(1), big(2)]).unwrap_err(),
            HubReaderError::ArithmeticOverflow
        );
    }

    #[test]
    fn test_wallet_portfolio() {
        let mut world = PropertyWorld::new();
        let wallet = Pubkey::new_unique();
        world.set_balance(&wallet, 125_000);

        let first = world.add_epoch(1, 100_000_000, 250_000);
        world.add_epoch(2, 40_000_000, 250_000);
        world.add_epoch(3, 0, 250_000);
        world.add_claim(&first, &wallet, 50_000_000);

        let revenue =
            ClaimableRevenue::for_wallet(&world.accounts, &world.config, &world.mint, &wallet)
                .unwrap();

        assert_eq!(revenue.total_claimable, 20_000_000);
        // Epoch 3 pays nothing and has no claim record
        assert_eq!(revenue.positions.len(), 2);

        let claimed = &revenue.positions[0];
        assert_eq!(claimed.epoch, first);
        assert!(claimed.claimed);
        assert_eq!(claimed.claimable, 0);
        assert_eq!(claimed.claimed_at, Some(CLAIMED_AT));

        let open = &revenue.positions[1];
        assert_eq!(open.epoch_number, 2);
        assert!(!open.claimed);
        assert_eq!(open.claimable, 20_000_000);
        assert_eq!(open.claimed_at, None);
    }

    #[test]
    fn test_wallet_without_epochs() {
        let world = PropertyWorld::new();
        let wallet = Pubkey::new_unique();
        let revenue =
            ClaimableRevenue::for_wallet(&world.accounts, &world.config, &world.mint, &wallet)
                .unwrap();
        assert_eq!(revenue.total_claimable, 0);
        assert!(revenue.positions.is_empty());
    }

    #[test]
    fn test_only_flag_one_blocks_payout() {
        let mut world = PropertyWorld::new();
        let wallet = Pubkey::new_unique();
        world.set_balance(&wallet, 125_000);

        let first = world.add_epoch(1, 100_000_000, 250_000);
        world.add_epoch(2, 40_000_000, 250_000);

        let program = world.config.hub_program_id;
        let (claim_address, _) = find_claim_record_address(&first, &wallet, &program);
        let mut data = claim_data(&first, &wallet, false, 0, 0);
        data[72] = 0x80;
        world.accounts.insert(claim_address, LedgerAccount::new(program, data));

        let revenue =
            ClaimableRevenue::for_wallet(&world.accounts, &world.config, &world.mint, &wallet)
                .unwrap();
        assert_eq!(revenue.total_claimable, 70_000_000);
        assert_eq!(revenue.positions.len(), 2);
        assert!(!revenue.positions[0].claimed);
        assert_eq!(revenue.positions[1].claimable, 20_000_000);

        let preview = preview_claimable(&world.accounts, &world.config, &first, &wallet).unwrap();
        assert_eq!(preview, 50_000_000);
    }

    #[test]
    fn test_revenue_history() {
        let mut world = PropertyWorld::new();
        let first = world.add_epoch(1, 100, 10);
        let second = world.insert_epoch(&RevenueEpoch {
            property_state: world.property_state,
            epoch_number: 2,
            total_revenue: 200,
            eligible_supply: 10,
            deposit: Some(sample_deposit(false)),
        });
        world.insert_epoch(&RevenueEpoch {
            property_state: world.property_state,
            epoch_number: 3,
            total_revenue: 50,
            eligible_supply: 10,
            deposit: None,
        });

        let claims = vec![
            settled_claim(first, 40),
            settled_claim(second, 200),
            settled_claim(Pubkey::new_unique(), 7),
        ];
        let history =
            RevenueHistory::for_property(&world.accounts, &world.config, &world.mint, &claims)
                .unwrap();

        assert_eq!(history.mint, world.mint);
        assert_eq!(history.property_state, world.property_state);
        assert_eq!(history.total_distributed, 240);
        assert_eq!(history.total_unclaimed, 110);

        let statuses: Vec<EpochStatus> = history.epochs.iter().map(|e| e.status).collect();
        assert_eq!(
            statuses,
            vec![EpochStatus::Finalized, EpochStatus::Active, EpochStatus::Active]
        );
        assert_eq!(history.epochs[0].remaining(), 60);
        assert_eq!(history.epochs[0].deposited_at, Some(DEPOSITED_AT));
        assert_eq!(history.epochs[1].remaining(), 0);
        assert_eq!(history.epochs[2].remaining(), 50);
        assert_eq!(history.epochs[2].deposited_at, None);
        assert_eq!(EpochStatus::Finalized.to_string(), "finalized");
    }

    #[test]
    fn test_revenue_history_without_epochs() {
        let world = PropertyWorld::new();
        let history =
            RevenueHistory::for_property(&world.accounts, &world.config, &world.mint, &[]).unwrap();
        assert!(history.epochs.is_empty());
        assert_eq!(history.total_distributed, 0);
        assert_eq!(history.total_unclaimed, 0);
    }
}
